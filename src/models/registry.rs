use std::collections::HashSet;

use ethers::types::Address;
use serde::{Deserialize, Serialize};

use crate::helpers::bucket_start;

pub const REGISTRY_ID: &str = "mcdex";

const HOUR_SECS: i64 = 3_600;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Address>", into = "Vec<Address>")]
pub struct SourceSet {
    order: Vec<Address>,
    members: HashSet<Address>,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: Address) -> bool {
        if !self.members.insert(address) {
            return false;
        }
        self.order.push(address);
        true
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl From<Vec<Address>> for SourceSet {
    fn from(addresses: Vec<Address>) -> Self {
        let mut set = SourceSet::new();
        for address in addresses {
            set.insert(address);
        }
        set
    }
}

impl From<SourceSet> for Vec<Address> {
    fn from(set: SourceSet) -> Self {
        set.order
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    pub id: String,
    pub sources: SourceSet,
    pub pools: SourceSet,
    pub hour_watermark: i64,
}

impl Registry {
    pub fn new(timestamp: i64) -> Self {
        Self {
            id: REGISTRY_ID.to_string(),
            sources: SourceSet::new(),
            pools: SourceSet::new(),
            hour_watermark: hour_start(timestamp),
        }
    }

    pub fn add_source(&mut self, source: Address) -> bool {
        if source.is_zero() {
            return false;
        }
        self.sources.insert(source)
    }

    pub fn add_pool(&mut self, pool: Address) -> bool {
        self.pools.insert(pool)
    }
}

pub fn hour_start(timestamp: i64) -> i64 {
    bucket_start(timestamp, HOUR_SECS)
}
