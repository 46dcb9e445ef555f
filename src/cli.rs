use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::EngineConfig;
use crate::errors::Result;
use crate::models::Resolution;

#[derive(Debug, Parser)]
#[command(author, version, about = "Simulate oracle candles over a synthetic chain", long_about = None)]
pub struct Args {
    #[arg(short, long, default_value_t = 3)]
    pub sources: u8,

    #[arg(short, long, value_parser = parse_duration, default_value = "2h")]
    pub time: Duration,

    #[arg(long, default_value_t = 12)]
    pub block_time: u64,

    #[arg(long, default_value_t = 1_700_000_000)]
    pub start_timestamp: i64,

    #[arg(long, default_value_t = 18_000_000)]
    pub start_block: u64,

    // JSON engine config; HANDLER_BLOCK is read when absent
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Steps below this block only run when the hour changes")]
    pub handler_block: Option<u64>,

    #[arg(long, default_value_t = 100.0)]
    pub initial_price: f64,

    #[arg(long, default_value_t = 0.002)]
    pub volatility: f64,

    #[arg(long, default_value_t = 0.05, help = "Probability that a price fetch is unavailable")]
    pub outage: f64,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(short, long, value_delimiter = ',', default_value = "15m,1h")]
    pub resolutions: Vec<Resolution>,

    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

impl Args {
    // --handler-block wins over the file or environment value
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_file(path)?,
            None => EngineConfig::from_env()?,
        };
        if let Some(handler_block) = self.handler_block {
            config.handler_block = handler_block;
        }
        Ok(config)
    }
}

#[derive(Debug, Clone)]
pub struct Duration {
    pub secs: u64,
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} seconds", self.secs)
    }
}

pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    if let Some(stripped) = s.strip_suffix('s') {
        let num = u64::from_str(stripped).map_err(|e| e.to_string())?;
        Ok(Duration { secs: num })
    } else if let Some(stripped) = s.strip_suffix('m') {
        let num = u64::from_str(stripped).map_err(|e| e.to_string())?;
        Ok(Duration { secs: num * 60 })
    } else if let Some(stripped) = s.strip_suffix('h') {
        let num = u64::from_str(stripped).map_err(|e| e.to_string())?;
        Ok(Duration { secs: num * 3600 })
    } else if let Some(stripped) = s.strip_suffix('d') {
        let num = u64::from_str(stripped).map_err(|e| e.to_string())?;
        Ok(Duration { secs: num * 86_400 })
    } else {
        Err("Invalid duration format. Use formats like 1s, 3m, 1h or 2d.".into())
    }
}
