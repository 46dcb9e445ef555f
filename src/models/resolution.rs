use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    M1,
    M5,
    M15,
    H1,
    D1,
    W1,
}

impl Resolution {
    pub const ALL: [Resolution; 6] = [
        Resolution::M1,
        Resolution::M5,
        Resolution::M15,
        Resolution::H1,
        Resolution::D1,
        Resolution::W1,
    ];

    pub const DERIVED: [Resolution; 5] = [
        Resolution::M5,
        Resolution::M15,
        Resolution::H1,
        Resolution::D1,
        Resolution::W1,
    ];

    pub fn length_secs(&self) -> i64 {
        match self {
            Resolution::M1 => Duration::minutes(1).num_seconds(),
            Resolution::M5 => Duration::minutes(5).num_seconds(),
            Resolution::M15 => Duration::minutes(15).num_seconds(),
            Resolution::H1 => Duration::hours(1).num_seconds(),
            Resolution::D1 => Duration::days(1).num_seconds(),
            Resolution::W1 => Duration::days(7).num_seconds(),
        }
    }

    // minute looks one bucket back, the rest look back `length` indices
    pub fn prior_offset(&self) -> i64 {
        match self {
            Resolution::M1 => 1,
            other => other.length_secs(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::M1 => "1m",
            Resolution::M5 => "5m",
            Resolution::M15 => "15m",
            Resolution::H1 => "1h",
            Resolution::D1 => "1d",
            Resolution::W1 => "1w",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(Resolution::M1),
            "5m" => Ok(Resolution::M5),
            "15m" => Ok(Resolution::M15),
            "1h" => Ok(Resolution::H1),
            "1d" => Ok(Resolution::D1),
            "1w" | "7d" => Ok(Resolution::W1),
            _ => Err(Error::UnknownResolution(s.to_string())),
        }
    }
}
