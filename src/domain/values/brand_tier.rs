use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Ordinal brand category. Higher tiers hold their value better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum BrandTier {
    Budget,
    Mid,
    Premium,
}

impl BrandTier {
    pub const ALL: [BrandTier; 3] = [BrandTier::Budget, BrandTier::Mid, BrandTier::Premium];

    pub fn new(value: i64) -> Result<Self, String> {
        match value {
            1 => Ok(BrandTier::Budget),
            2 => Ok(BrandTier::Mid),
            3 => Ok(BrandTier::Premium),
            _ => Err(format!("brand_tier must be between 1 and 3, got {value}")),
        }
    }

    pub fn value(&self) -> u8 {
        match self {
            BrandTier::Budget => 1,
            BrandTier::Mid => 2,
            BrandTier::Premium => 3,
        }
    }

    /// Fraction of value lost per year of age.
    pub fn annual_depreciation(&self) -> f64 {
        match self {
            BrandTier::Budget => 0.25,
            BrandTier::Mid => 0.20,
            BrandTier::Premium => 0.15,
        }
    }

    /// Original price band in whole currency units. Bands are disjoint and
    /// ordered by tier; the premium band's end is inclusive.
    pub fn price_band(&self) -> Range<u32> {
        match self {
            BrandTier::Budget => 5_000..20_000,
            BrandTier::Mid => 20_000..80_000,
            BrandTier::Premium => 80_000..500_001,
        }
    }

    /// Relative draw weight used by the market data generator.
    pub fn market_weight(&self) -> u32 {
        match self {
            BrandTier::Budget => 30,
            BrandTier::Mid => 40,
            BrandTier::Premium => 30,
        }
    }
}

impl TryFrom<i64> for BrandTier {
    type Error = String;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        BrandTier::new(value)
    }
}

impl From<BrandTier> for i64 {
    fn from(t: BrandTier) -> Self {
        i64::from(t.value())
    }
}

impl fmt::Display for BrandTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrandTier::Budget => write!(f, "budget"),
            BrandTier::Mid => write!(f, "mid"),
            BrandTier::Premium => write!(f, "premium"),
        }
    }
}
