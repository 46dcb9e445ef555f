use ethers::types::Address;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::helpers::bucket_index;
use crate::models::{Candle, Resolution};
use crate::store::{Store, StoreExt};

// only loads; callers persist the returned candles
pub struct BucketAggregator;

impl BucketAggregator {
    pub fn aggregate<S: Store + ?Sized>(
        store: &S,
        source: &Address,
        timestamp: i64,
        price: Decimal,
    ) -> Result<Vec<Candle>> {
        Resolution::DERIVED
            .iter()
            .map(|&resolution| Self::fold_sample(store, resolution, source, timestamp, price))
            .collect()
    }

    pub fn fold_sample<S: Store + ?Sized>(
        store: &S,
        resolution: Resolution,
        source: &Address,
        timestamp: i64,
        price: Decimal,
    ) -> Result<Candle> {
        let index = bucket_index(timestamp, resolution.length_secs());
        match store.load_candle(resolution, source, index)? {
            Some(mut candle) => {
                candle.fold(price);
                Ok(candle)
            }
            None => Self::open_bucket(store, resolution, source, timestamp, price),
        }
    }

    pub fn open_bucket<S: Store + ?Sized>(
        store: &S,
        resolution: Resolution,
        source: &Address,
        timestamp: i64,
        price: Decimal,
    ) -> Result<Candle> {
        let mut candle = Candle::new(*source, resolution, timestamp, price);
        let prior_index = candle.bucket_index() - resolution.prior_offset();
        if let Some(prior) = store.load_candle(resolution, source, prior_index)? {
            candle.carry_open(prior.close);
        }
        Ok(candle)
    }
}
