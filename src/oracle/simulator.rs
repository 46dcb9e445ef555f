use std::collections::HashMap;

use ethers::types::{Address, U256};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use super::{PriceReading, PriceSource};
use crate::errors::{Error, Result};
use crate::helpers::PRICE_DECIMALS;

const SIMULATED_PRECISION: u32 = 8;

pub struct SimulatedPriceSource {
    prices: HashMap<Address, f64>,
    initial_price: f64,
    normal_dist: Normal<f64>,
    outage_probability: f64,
    rng: StdRng,
}

impl SimulatedPriceSource {
    pub fn new(
        initial_price: f64,
        volatility: f64,
        outage_probability: f64,
        seed: u64,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&outage_probability) {
            return Err(Error::Config(format!(
                "outage probability {outage_probability} is not within [0, 1]"
            )));
        }
        let normal_dist =
            Normal::new(0.0, volatility).map_err(|e| Error::Config(e.to_string()))?;
        Ok(Self {
            prices: HashMap::new(),
            initial_price,
            normal_dist,
            outage_probability,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn current_price(&self, source: &Address) -> Option<f64> {
        self.prices.get(source).copied()
    }

    fn step(&mut self, source: &Address) -> f64 {
        let change = self.normal_dist.sample(&mut self.rng);
        let price = self.prices.entry(*source).or_insert(self.initial_price);
        *price *= 1.0 + change;
        *price
    }
}

impl PriceSource for SimulatedPriceSource {
    fn fetch_price(&mut self, source: &Address) -> PriceReading {
        let price = self.step(source);
        if self.rng.random_bool(self.outage_probability) {
            return PriceReading::Unavailable;
        }
        to_raw(price).into()
    }
}

fn to_raw(price: f64) -> Option<U256> {
    let value = Decimal::from_f64(price)?.round_dp(SIMULATED_PRECISION);
    if value <= Decimal::ZERO {
        return None;
    }
    let mantissa = u128::try_from(value.mantissa()).ok()?;
    let shift = PRICE_DECIMALS.checked_sub(value.scale())?;
    Some(U256::from(mantissa) * U256::exp10(shift as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::to_decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_to_raw_scales_to_price_decimals() {
        let raw = to_raw(123.5).unwrap();
        assert_eq!(to_decimal(raw, PRICE_DECIMALS).unwrap(), dec!(123.5));
        assert!(to_raw(0.0).is_none());
        assert!(to_raw(-1.0).is_none());
    }

    #[test]
    fn test_price_simulation_stays_positive() {
        let source = Address::repeat_byte(1);
        let mut oracle = SimulatedPriceSource::new(100.0, 0.01, 0.0, 7).unwrap();
        for _ in 0..100 {
            match oracle.fetch_price(&source) {
                PriceReading::Value(raw) => assert!(!raw.is_zero()),
                PriceReading::Unavailable => panic!("no outages configured"),
            }
        }
        assert_ne!(oracle.current_price(&source), Some(100.0));
    }

    #[test]
    fn test_full_outage() {
        let mut oracle = SimulatedPriceSource::new(100.0, 0.01, 1.0, 7).unwrap();
        assert_eq!(
            oracle.fetch_price(&Address::repeat_byte(1)),
            PriceReading::Unavailable
        );
    }

    #[test]
    fn test_same_seed_same_walk() {
        let source = Address::repeat_byte(5);
        let mut a = SimulatedPriceSource::new(50.0, 0.02, 0.1, 99).unwrap();
        let mut b = SimulatedPriceSource::new(50.0, 0.02, 0.1, 99).unwrap();
        for _ in 0..20 {
            assert_eq!(a.fetch_price(&source), b.fetch_price(&source));
        }
    }

    #[test]
    fn test_rejects_bad_outage_probability() {
        assert!(SimulatedPriceSource::new(1.0, 0.01, 1.5, 0).is_err());
    }
}
