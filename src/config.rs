//! Configuration for periodic volume evaluation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether the upper bound of a periodic interval belongs to the volume.
///
/// The lower bound is always inclusive. For an inverted interval the
/// "upper" bound is the one reached when wrapping from the domain start,
/// i.e. the normalized `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UpperBoundary {
    /// `max` is inside the volume. Adjacent interfaces never leave a gap.
    #[default]
    Inclusive,
    /// `max` is outside the volume.
    Exclusive,
}

impl UpperBoundary {
    /// Returns true if `value` lies below (or at, when inclusive) `max`.
    pub fn admits(self, value: f64, max: f64) -> bool {
        match self {
            UpperBoundary::Inclusive => value <= max,
            UpperBoundary::Exclusive => value < max,
        }
    }
}

/// Options applied when constructing periodic volumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PeriodicConfig {
    /// Treatment of the normalized upper bound.
    pub upper_boundary: UpperBoundary,
}

impl PeriodicConfig {
    pub const fn new(upper_boundary: UpperBoundary) -> Self {
        Self { upper_boundary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_inclusive() {
        let cfg = PeriodicConfig::default();
        assert_eq!(cfg.upper_boundary, UpperBoundary::Inclusive);
    }

    #[test]
    fn admits_respects_policy() {
        assert!(UpperBoundary::Inclusive.admits(70.0, 70.0));
        assert!(!UpperBoundary::Exclusive.admits(70.0, 70.0));
        assert!(UpperBoundary::Exclusive.admits(69.9, 70.0));
        assert!(!UpperBoundary::Inclusive.admits(70.1, 70.0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_serde_roundtrip() {
        let cfg = PeriodicConfig::new(UpperBoundary::Exclusive);
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(json, r#"{"upper_boundary":"exclusive"}"#);
        let back: PeriodicConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
