use ethers::types::Address;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::oracle::PriceSource;
use crate::services::{StepDriver, StepOutcome};
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    PoolCreated { timestamp: i64, pool: Address },
    SourceRegistered { source: Address },
    SourceChanged { source: Address },
    TimeStep { timestamp: i64, step_number: u64 },
}

impl<S: Store, P: PriceSource> StepDriver<S, P> {
    pub fn handle(&mut self, event: &Event) -> Result<Option<StepOutcome>> {
        match *event {
            Event::PoolCreated { timestamp, pool } => {
                self.on_pool_created(timestamp, pool)?;
                Ok(None)
            }
            Event::SourceRegistered { source } | Event::SourceChanged { source } => {
                self.on_source_registered(source)?;
                Ok(None)
            }
            Event::TimeStep {
                timestamp,
                step_number,
            } => self.on_time_step(timestamp, step_number).map(Some),
        }
    }
}
