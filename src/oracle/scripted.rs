use std::collections::{HashMap, VecDeque};

use ethers::types::{Address, U256};

use super::{PriceReading, PriceSource};

// queued readings per source first, then the fixed fallback
#[derive(Debug, Clone)]
pub struct ScriptedPriceSource {
    queues: HashMap<Address, VecDeque<PriceReading>>,
    fallback: HashMap<Address, PriceReading>,
    fetched: Vec<Address>,
}

impl ScriptedPriceSource {
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
            fallback: HashMap::new(),
            fetched: Vec::new(),
        }
    }

    pub fn push(&mut self, source: Address, reading: PriceReading) -> &mut Self {
        self.queues.entry(source).or_default().push_back(reading);
        self
    }

    pub fn push_raw(&mut self, source: Address, raw: U256) -> &mut Self {
        self.push(source, PriceReading::Value(raw))
    }

    pub fn set_fallback(&mut self, source: Address, reading: PriceReading) -> &mut Self {
        self.fallback.insert(source, reading);
        self
    }

    pub fn calls(&self) -> usize {
        self.fetched.len()
    }

    pub fn fetched(&self) -> &[Address] {
        &self.fetched
    }
}

impl Default for ScriptedPriceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceSource for ScriptedPriceSource {
    fn fetch_price(&mut self, source: &Address) -> PriceReading {
        self.fetched.push(*source);
        self.queues
            .get_mut(source)
            .and_then(|queue| queue.pop_front())
            .or_else(|| self.fallback.get(source).copied())
            .unwrap_or(PriceReading::Unavailable)
    }
}
