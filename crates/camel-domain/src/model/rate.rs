//! Price-per-kilogram rates offered at the station

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use camel_types::ParseRateError;

/// Price per kilogram of net weight
///
/// Stored as the plain number (`30000`, `40000`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Rate {
    /// 30,000 per kg
    #[default]
    Standard,
    /// 40,000 per kg
    Premium,
}

impl Rate {
    pub const ALL: [Rate; 2] = [Rate::Standard, Rate::Premium];

    pub fn per_kg(self) -> u32 {
        match self {
            Rate::Standard => 30_000,
            Rate::Premium => 40_000,
        }
    }

    /// Label with thousands separator, as shown in the rate picker
    pub fn label(self) -> &'static str {
        match self {
            Rate::Standard => "30,000",
            Rate::Premium => "40,000",
        }
    }
}

impl TryFrom<u32> for Rate {
    type Error = ParseRateError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Rate::ALL
            .into_iter()
            .find(|rate| rate.per_kg() == value)
            .ok_or_else(|| ParseRateError(value.to_string()))
    }
}

impl From<Rate> for u32 {
    fn from(rate: Rate) -> Self {
        rate.per_kg()
    }
}

impl FromStr for Rate {
    type Err = ParseRateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s
            .trim()
            .chars()
            .filter(|c| *c != ',' && *c != '_')
            .collect();
        let value: u32 = digits.parse().map_err(|_| ParseRateError(s.to_string()))?;
        Rate::try_from(value)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.per_kg())
    }
}
