use ethers::types::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::helpers::{bucket_index, source_id};
use crate::models::Resolution;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub source: Address,
    pub resolution: Resolution,
    pub timestamp: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

impl Candle {
    pub fn new(source: Address, resolution: Resolution, timestamp: i64, price: Decimal) -> Self {
        let length = resolution.length_secs();
        Self {
            source,
            resolution,
            timestamp: bucket_index(timestamp, length) * length,
            open: price,
            high: price,
            low: price,
            close: price,
        }
    }

    pub fn bucket_index(&self) -> i64 {
        bucket_index(self.timestamp, self.resolution.length_secs())
    }

    pub fn key(&self) -> String {
        candle_key(&self.source, self.bucket_index())
    }

    pub fn carry_open(&mut self, prior_close: Decimal) {
        self.open = prior_close;
        if prior_close > self.high {
            self.high = prior_close;
        } else if prior_close < self.low {
            self.low = prior_close;
        }
    }

    pub fn fold(&mut self, price: Decimal) {
        self.close = price;
        if price > self.high {
            self.high = price;
        } else if price < self.low {
            self.low = price;
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.low <= self.open
            && self.open <= self.high
            && self.low <= self.close
            && self.close <= self.high
    }
}

pub fn candle_key(source: &Address, bucket_index: i64) -> String {
    format!("{}-{}", source_id(source), bucket_index)
}
