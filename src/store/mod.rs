pub mod memory;
pub mod snapshot;

use std::fmt;
use std::str::FromStr;

use ethers::types::Address;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::helpers::source_id;
use crate::models::{candle_key, Candle, LatestPrice, Registry, Resolution, REGISTRY_ID};

pub use memory::MemoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EntityKind {
    Registry,
    LatestPrice,
    Candle(Resolution),
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Registry => f.write_str("registry"),
            EntityKind::LatestPrice => f.write_str("latest_price"),
            EntityKind::Candle(resolution) => write!(f, "candle_{resolution}"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "registry" => Ok(EntityKind::Registry),
            "latest_price" => Ok(EntityKind::LatestPrice),
            other => other
                .strip_prefix("candle_")
                .and_then(|label| label.parse::<Resolution>().ok())
                .map(EntityKind::Candle)
                .ok_or_else(|| Error::UnknownEntityKind(other.to_string())),
        }
    }
}

impl From<EntityKind> for String {
    fn from(kind: EntityKind) -> Self {
        kind.to_string()
    }
}

impl TryFrom<String> for EntityKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    Registry(Registry),
    LatestPrice(LatestPrice),
    Candle(Candle),
}

impl Record {
    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Registry(_) => EntityKind::Registry,
            Record::LatestPrice(_) => EntityKind::LatestPrice,
            Record::Candle(candle) => EntityKind::Candle(candle.resolution),
        }
    }

    pub fn key(&self) -> String {
        match self {
            Record::Registry(registry) => registry.id.clone(),
            Record::LatestPrice(latest) => source_id(&latest.source),
            Record::Candle(candle) => candle.key(),
        }
    }
}

pub trait Store {
    fn load(&self, kind: EntityKind, key: &str) -> Result<Option<Record>>;

    fn save(&mut self, record: Record) -> Result<()>;
}

pub trait StoreExt: Store {
    fn load_registry(&self) -> Result<Option<Registry>> {
        match self.load(EntityKind::Registry, REGISTRY_ID)? {
            None => Ok(None),
            Some(Record::Registry(registry)) => Ok(Some(registry)),
            Some(_) => Err(mismatch(EntityKind::Registry, REGISTRY_ID)),
        }
    }

    fn load_latest_price(&self, source: &Address) -> Result<Option<LatestPrice>> {
        let key = source_id(source);
        match self.load(EntityKind::LatestPrice, &key)? {
            None => Ok(None),
            Some(Record::LatestPrice(latest)) => Ok(Some(latest)),
            Some(_) => Err(mismatch(EntityKind::LatestPrice, &key)),
        }
    }

    fn load_candle(
        &self,
        resolution: Resolution,
        source: &Address,
        bucket_index: i64,
    ) -> Result<Option<Candle>> {
        let kind = EntityKind::Candle(resolution);
        let key = candle_key(source, bucket_index);
        match self.load(kind, &key)? {
            None => Ok(None),
            Some(Record::Candle(candle)) => Ok(Some(candle)),
            Some(_) => Err(mismatch(kind, &key)),
        }
    }
}

impl<T: Store + ?Sized> StoreExt for T {}

fn mismatch(expected: EntityKind, key: &str) -> Error {
    Error::RecordKindMismatch {
        expected,
        key: key.to_string(),
    }
}
