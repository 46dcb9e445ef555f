use anyhow::Context;
use chrono::DateTime;
use clap::Parser;
use ethers::types::Address;
use log::info;
use oracle_candles::{
    cli::Args,
    helpers::source_id,
    models::Candle,
    oracle::SimulatedPriceSource,
    services::StepSummary,
    store::MemoryStore,
    Event, StepDriver, StepOutcome,
};

#[derive(Default)]
struct RunTotals {
    steps: u64,
    gated: u64,
    samples: StepSummary,
}

impl RunTotals {
    fn update(&mut self, outcome: &StepOutcome) {
        self.steps += 1;
        match outcome {
            StepOutcome::HourGated => self.gated += 1,
            StepOutcome::Processed(summary) => {
                self.samples.accepted += summary.accepted;
                self.samples.already_sampled += summary.already_sampled;
                self.samples.unavailable += summary.unavailable;
                self.samples.zero_price += summary.zero_price;
            }
            StepOutcome::Uninitialized => {}
        }
    }

    fn report(&self) -> String {
        format!(
            "\nRun Summary\n\
            Steps:           {}\n\
            Hour gated:      {}\n\
            Accepted:        {}\n\
            Sampled earlier: {}\n\
            Unavailable:     {}\n\
            Zero price:      {}\n",
            self.steps,
            self.gated,
            self.samples.accepted,
            self.samples.already_sampled,
            self.samples.unavailable,
            self.samples.zero_price,
        )
    }
}

fn format_timestamp(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

fn print_candles(title: &str, candles: &[Candle]) {
    println!("\n=== {title} ===");
    println!(
        "{:<17} {:>14} {:>14} {:>14} {:>14}",
        "Start", "Open", "High", "Low", "Close"
    );
    for candle in candles {
        println!(
            "{:<17} {:>14.4} {:>14.4} {:>14.4} {:>14.4}",
            format_timestamp(candle.timestamp),
            candle.open,
            candle.high,
            candle.low,
            candle.close
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let oracle = SimulatedPriceSource::new(args.initial_price, args.volatility, args.outage, args.seed)?;
    let mut driver = StepDriver::new(args.engine_config()?, MemoryStore::new(), oracle);

    let sources: Vec<Address> = (1..=args.sources).map(Address::repeat_byte).collect();
    let mut events = vec![Event::PoolCreated {
        timestamp: args.start_timestamp,
        pool: Address::repeat_byte(0xff),
    }];
    events.extend(sources.iter().map(|&source| Event::SourceRegistered { source }));
    for event in &events {
        driver.handle(event)?;
    }

    let block_time = args.block_time.max(1);
    let blocks = args.time.secs / block_time;
    info!(
        "Simulating {} blocks over {} for {} sources",
        blocks,
        args.time,
        sources.len()
    );

    let mut totals = RunTotals::default();
    for block in 0..blocks {
        let event = Event::TimeStep {
            timestamp: args.start_timestamp + (block * block_time) as i64,
            step_number: args.start_block + block,
        };
        if let Some(outcome) = driver.handle(&event)? {
            totals.update(&outcome);
        }
    }

    let (store, _) = driver.into_parts();
    for source in &sources {
        for resolution in &args.resolutions {
            let title = format!("{} {}", source_id(source), resolution);
            print_candles(&title, &store.candles(*resolution, source));
        }
    }
    print!("{}", totals.report());

    if let Some(path) = &args.snapshot {
        store
            .write_snapshot(path)
            .with_context(|| format!("writing snapshot to {}", path.display()))?;
    }
    Ok(())
}
