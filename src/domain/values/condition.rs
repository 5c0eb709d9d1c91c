use serde::{Deserialize, Serialize};
use std::fmt;

/// Item condition on a 1 (bad) to 5 (like new) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Condition(u8);

impl Condition {
    pub const BEST: Condition = Condition(5);
    pub const ALL: [Condition; 5] = [
        Condition(1),
        Condition(2),
        Condition(3),
        Condition(4),
        Condition(5),
    ];

    pub fn new(value: i64) -> Result<Self, String> {
        if !(1..=5).contains(&value) {
            return Err(format!("condition must be between 1 and 5, got {value}"));
        }
        Ok(Condition(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Extra fraction of value lost for every point below like-new.
    pub fn loss_factor(&self) -> f64 {
        f64::from(5 - self.0) * 0.05
    }
}

impl TryFrom<i64> for Condition {
    type Error = String;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Condition::new(value)
    }
}

impl From<Condition> for i64 {
    fn from(c: Condition) -> Self {
        i64::from(c.0)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range() {
        assert!(Condition::new(0).is_err());
        assert!(Condition::new(6).is_err());
        assert!(Condition::new(-1).is_err());
    }

    #[test]
    fn test_worse_condition_loses_more() {
        assert_eq!(Condition::BEST.loss_factor(), 0.0);
        assert!((Condition::ALL[0].loss_factor() - 0.20).abs() < 1e-12);
        let factors: Vec<f64> = Condition::ALL.iter().map(|c| c.loss_factor()).collect();
        assert!(factors.windows(2).all(|w| w[0] > w[1]));
    }
}
