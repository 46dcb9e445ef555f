use ethers::types::Address;
use log::{debug, info};

use super::sampler::{MinuteSampler, SampleOutcome};
use crate::config::EngineConfig;
use crate::errors::Result;
use crate::helpers::source_id;
use crate::models::{hour_start, Registry};
use crate::oracle::PriceSource;
use crate::store::{Record, Store, StoreExt};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepSummary {
    pub timestamp: i64,
    pub step_number: u64,
    pub accepted: usize,
    pub already_sampled: usize,
    pub unavailable: usize,
    pub zero_price: usize,
}

impl StepSummary {
    fn record(&mut self, outcome: &SampleOutcome) {
        match outcome {
            SampleOutcome::Accepted(_) => self.accepted += 1,
            SampleOutcome::AlreadySampled => self.already_sampled += 1,
            SampleOutcome::Unavailable => self.unavailable += 1,
            SampleOutcome::ZeroPrice => self.zero_price += 1,
        }
    }

    pub fn sources(&self) -> usize {
        self.accepted + self.already_sampled + self.unavailable + self.zero_price
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Uninitialized,
    HourGated,
    Processed(StepSummary),
}

pub struct StepDriver<S, P> {
    config: EngineConfig,
    store: S,
    oracle: P,
}

impl<S: Store, P: PriceSource> StepDriver<S, P> {
    pub fn new(config: EngineConfig, store: S, oracle: P) -> Self {
        Self {
            config,
            store,
            oracle,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn oracle(&self) -> &P {
        &self.oracle
    }

    pub fn into_parts(self) -> (S, P) {
        (self.store, self.oracle)
    }

    pub fn on_pool_created(&mut self, timestamp: i64, pool: Address) -> Result<()> {
        let mut registry = match self.store.load_registry()? {
            Some(registry) => registry,
            None => {
                info!("Initializing registry at hour {}", hour_start(timestamp));
                Registry::new(timestamp)
            }
        };
        if registry.add_pool(pool) {
            info!("Tracking pool {}", source_id(&pool));
        }
        self.store.save(Record::Registry(registry))
    }

    pub fn on_source_registered(&mut self, source: Address) -> Result<bool> {
        let Some(mut registry) = self.store.load_registry()? else {
            debug!(
                "Ignoring source {} before any pool exists",
                source_id(&source)
            );
            return Ok(false);
        };
        if !registry.add_source(source) {
            debug!("Source {} already tracked or zero", source_id(&source));
            return Ok(false);
        }
        info!(
            "Tracking source {} ({} total)",
            source_id(&source),
            registry.sources.len()
        );
        self.store.save(Record::Registry(registry))?;
        Ok(true)
    }

    pub fn on_time_step(&mut self, timestamp: i64, step_number: u64) -> Result<StepOutcome> {
        let Some(mut registry) = self.store.load_registry()? else {
            return Ok(StepOutcome::Uninitialized);
        };

        let hour = hour_start(timestamp);
        if self.config.is_legacy_step(step_number) && registry.hour_watermark == hour {
            debug!("Step {step_number} gated, hour {hour} already processed");
            return Ok(StepOutcome::HourGated);
        }
        registry.hour_watermark = hour;
        self.store.save(Record::Registry(registry.clone()))?;

        let mut summary = StepSummary {
            timestamp,
            step_number,
            ..StepSummary::default()
        };
        for source in registry.sources.iter() {
            let outcome =
                MinuteSampler::sample(&mut self.store, &mut self.oracle, source, timestamp)?;
            summary.record(&outcome);
        }

        if summary.accepted > 0 {
            info!(
                "Step {step_number} at {timestamp}: {} accepted, {} sampled earlier, {} unavailable, {} zero",
                summary.accepted, summary.already_sampled, summary.unavailable, summary.zero_price
            );
        }
        Ok(StepOutcome::Processed(summary))
    }
}
