use ethers::types::Address;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::aggregator::BucketAggregator;
use crate::errors::Result;
use crate::helpers::{bucket_index, source_id, to_decimal, PRICE_DECIMALS};
use crate::models::{LatestPrice, Resolution};
use crate::oracle::{PriceReading, PriceSource};
use crate::store::{Record, Store, StoreExt};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    AlreadySampled,
    Unavailable,
    ZeroPrice,
    Accepted(Decimal),
}

pub struct MinuteSampler;

impl MinuteSampler {
    pub fn sample<S, P>(
        store: &mut S,
        oracle: &mut P,
        source: &Address,
        timestamp: i64,
    ) -> Result<SampleOutcome>
    where
        S: Store + ?Sized,
        P: PriceSource + ?Sized,
    {
        let id = source_id(source);
        let minute = bucket_index(timestamp, Resolution::M1.length_secs());
        if store.load_candle(Resolution::M1, source, minute)?.is_some() {
            debug!("[{id}] Minute {minute} already sampled");
            return Ok(SampleOutcome::AlreadySampled);
        }

        let raw = match oracle.fetch_price(source) {
            PriceReading::Value(raw) => raw,
            PriceReading::Unavailable => {
                debug!("[{id}] Price unavailable at {timestamp}");
                return Ok(SampleOutcome::Unavailable);
            }
        };
        let price = match to_decimal(raw, PRICE_DECIMALS) {
            Ok(price) => price,
            Err(e) => {
                warn!("[{id}] Dropping reading at {timestamp}: {e}");
                return Ok(SampleOutcome::Unavailable);
            }
        };
        if price.is_zero() {
            warn!("[{id}] Ignoring zero price at {timestamp}");
            return Ok(SampleOutcome::ZeroPrice);
        }

        let mut writes = vec![Record::LatestPrice(LatestPrice {
            source: *source,
            price,
        })];
        let minute_candle =
            BucketAggregator::open_bucket(&*store, Resolution::M1, source, timestamp, price)?;
        writes.push(Record::Candle(minute_candle));
        writes.extend(
            BucketAggregator::aggregate(&*store, source, timestamp, price)?
                .into_iter()
                .map(Record::Candle),
        );

        for record in writes {
            store.save(record)?;
        }
        debug!("[{id}] Accepted price {price} for minute {minute}");
        Ok(SampleOutcome::Accepted(price))
    }
}
