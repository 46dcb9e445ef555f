use ethers::types::{Address, U256};
use log::debug;
use rust_decimal::Decimal;

use crate::errors::{Error, Result};

pub const PRICE_DECIMALS: u32 = 18;

const MAX_SCALE: u32 = 28;
const MAX_MANTISSA: u128 = 79_228_162_514_264_337_593_543_950_335;

// wider than the mantissa: drop fractional digits, error if still too wide
pub fn to_decimal(raw: U256, decimals: u32) -> Result<Decimal> {
    let ten = U256::from(10u8);
    let max_mantissa = U256::from(MAX_MANTISSA);

    let mut mantissa = raw;
    let mut scale = decimals;
    while scale > MAX_SCALE || mantissa > max_mantissa {
        if scale == 0 {
            return Err(Error::DecimalOverflow(raw.to_string()));
        }
        mantissa /= ten;
        scale -= 1;
    }
    if scale != decimals {
        debug!("Narrowed raw value {raw} from scale {decimals} to {scale}");
    }

    let value = Decimal::try_from_i128_with_scale(mantissa.as_u128() as i128, scale)
        .map_err(|_| Error::DecimalOverflow(raw.to_string()))?;
    Ok(value.normalize())
}

pub fn bucket_index(timestamp: i64, length_secs: i64) -> i64 {
    timestamp.div_euclid(length_secs)
}

pub fn bucket_start(timestamp: i64, length_secs: i64) -> i64 {
    bucket_index(timestamp, length_secs) * length_secs
}

pub fn source_id(address: &Address) -> String {
    format!("{address:#x}")
}
