pub mod candle;
pub mod registry;
pub mod resolution;

use ethers::types::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use candle::{candle_key, Candle};
pub use registry::{hour_start, Registry, SourceSet, REGISTRY_ID};
pub use resolution::Resolution;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestPrice {
    pub source: Address,
    pub price: Decimal,
}
