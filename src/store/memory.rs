use std::collections::BTreeMap;

use ethers::types::Address;
use serde::{Deserialize, Serialize};

use super::{EntityKind, Record, Store};
use crate::errors::Result;
use crate::models::{Candle, Resolution};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    tables: BTreeMap<EntityKind, BTreeMap<String, Record>>,
    #[serde(skip)]
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        self.tables.get(&kind).map_or(0, |table| table.len())
    }

    pub fn candles(&self, resolution: Resolution, source: &Address) -> Vec<Candle> {
        let mut candles: Vec<Candle> = self
            .tables
            .get(&EntityKind::Candle(resolution))
            .into_iter()
            .flat_map(|table| table.values())
            .filter_map(|record| match record {
                Record::Candle(candle) if candle.source == *source => Some(candle.clone()),
                _ => None,
            })
            .collect();
        candles.sort_by_key(|candle| candle.timestamp);
        candles
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.tables.values().flat_map(|table| table.values())
    }

    #[cfg(test)]
    pub(crate) fn insert_raw(&mut self, kind: EntityKind, key: &str, record: Record) {
        self.tables
            .entry(kind)
            .or_default()
            .insert(key.to_string(), record);
    }
}

impl Store for MemoryStore {
    fn load(&self, kind: EntityKind, key: &str) -> Result<Option<Record>> {
        Ok(self
            .tables
            .get(&kind)
            .and_then(|table| table.get(key))
            .cloned())
    }

    fn save(&mut self, record: Record) -> Result<()> {
        self.writes += 1;
        self.tables
            .entry(record.kind())
            .or_default()
            .insert(record.key(), record);
        Ok(())
    }
}
