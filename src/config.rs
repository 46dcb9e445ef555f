use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

pub const HANDLER_BLOCK_ENV: &str = "HANDLER_BLOCK";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    // steps numbered below this only run when the hour has changed
    #[serde(default)]
    pub handler_block: u64,
}

impl EngineConfig {
    pub fn new(handler_block: u64) -> Self {
        Self { handler_block }
    }

    pub fn from_env() -> Result<Self> {
        match std::env::var(HANDLER_BLOCK_ENV) {
            Ok(value) => Self::parse_handler_block(&value).map(Self::new),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(Error::Config(format!("{HANDLER_BLOCK_ENV}: {e}"))),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| Error::JsonParse(e.to_string()))
    }

    pub fn parse_handler_block(value: &str) -> Result<u64> {
        value
            .trim()
            .parse::<u64>()
            .map_err(|e| Error::Config(format!("{HANDLER_BLOCK_ENV}={value}: {e}")))
    }

    pub fn is_legacy_step(&self, step_number: u64) -> bool {
        step_number < self.handler_block
    }
}
