pub mod scripted;
pub mod simulator;

use ethers::types::{Address, U256};

pub use scripted::ScriptedPriceSource;
pub use simulator::SimulatedPriceSource;

// a zero price is still a Value, the sampler rejects it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceReading {
    Unavailable,
    Value(U256),
}

impl From<Option<U256>> for PriceReading {
    fn from(value: Option<U256>) -> Self {
        value.map_or(PriceReading::Unavailable, PriceReading::Value)
    }
}

pub trait PriceSource {
    fn fetch_price(&mut self, source: &Address) -> PriceReading;
}
