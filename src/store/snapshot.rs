use std::fs;
use std::path::Path;

use log::info;

use super::MemoryStore;
use crate::errors::{Error, Result};

impl MemoryStore {
    pub fn write_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|e| Error::JsonParse(e.to_string()))?;
        fs::write(path, json)?;
        info!("Wrote store snapshot to {}", path.display());
        Ok(())
    }

    pub fn read_snapshot(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let store = serde_json::from_str(&json).map_err(|e| Error::JsonParse(e.to_string()))?;
        info!("Loaded store snapshot from {}", path.display());
        Ok(store)
    }
}
