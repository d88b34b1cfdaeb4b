//! Periodic interval leaf and its domain arithmetic.
//!
//! Values in a periodic domain `[period_min, period_max)` that differ by an
//! integer multiple of the domain length are equivalent. Every value is
//! mapped to its canonical representative before comparison, so membership
//! is invariant under whole-period shifts.

use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};

use log::debug;

use super::error::VolumeError;
use super::hash_f64;
use crate::config::PeriodicConfig;
use crate::cv::{same_cv, SharedCv};

/// Periodic domain `[period_min, period_max)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicDomain {
    min: f64,
    max: f64,
}

impl PeriodicDomain {
    /// Creates the domain `[period_min, period_max)`.
    ///
    /// # Errors
    ///
    /// [`VolumeError::InvalidPeriod`] unless both ends are finite and
    /// `period_min < period_max`.
    pub fn new(period_min: f64, period_max: f64) -> Result<Self, VolumeError> {
        let valid = period_min.is_finite() && period_max.is_finite() && period_min < period_max;
        if !valid {
            return Err(VolumeError::InvalidPeriod {
                period_min,
                period_max,
            });
        }
        Ok(Self {
            min: period_min,
            max: period_max,
        })
    }

    pub const fn min(&self) -> f64 {
        self.min
    }

    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Offset of the canonical window, equal to `period_min`.
    pub const fn shift(&self) -> f64 {
        self.min
    }

    pub fn len(&self) -> f64 {
        self.max - self.min
    }

    /// Maps `value` to its representative in `[shift, shift + len)`.
    pub fn canonical(&self, value: f64) -> f64 {
        let len = self.len();
        let mut offset = (value - self.min).rem_euclid(len);
        // rem_euclid may round up to exactly `len` for tiny negative offsets
        if offset >= len {
            offset = 0.0;
        }
        offset + self.min
    }
}

impl Eq for PeriodicDomain {}

impl Hash for PeriodicDomain {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f64(self.min, state);
        hash_f64(self.max, state);
    }
}

/// Interval over a periodic collective variable, with wraparound.
///
/// With an explicit [`PeriodicDomain`], the raw bounds are normalized into
/// the canonical window at construction. If the normalized `min` exceeds
/// `max` the interval is *inverted*: it wraps through the domain boundary
/// and covers `[shift, max] ∪ [min, shift + len)`.
///
/// Without a domain (implicit mode) the CV is assumed to return canonical
/// values already; bounds are kept as given and `min > max` means the
/// interval wraps.
pub struct LambdaVolumePeriodic<P> {
    cv: SharedCv<P>,
    min: f64,
    max: f64,
    domain: Option<PeriodicDomain>,
    inverted: bool,
    config: PeriodicConfig,
}

impl<P> LambdaVolumePeriodic<P> {
    /// Creates a periodic interval with the default boundary policy.
    pub fn new(
        cv: SharedCv<P>,
        lambda_min: f64,
        lambda_max: f64,
        domain: Option<PeriodicDomain>,
    ) -> Result<Self, VolumeError> {
        Self::with_config(cv, lambda_min, lambda_max, domain, PeriodicConfig::default())
    }

    /// Creates a periodic interval.
    ///
    /// # Errors
    ///
    /// - [`VolumeError::NaNBound`] if either bound is NaN
    /// - [`VolumeError::InvalidBounds`] if a bound is infinite while a
    ///   domain is given (it has no canonical representative)
    /// - [`VolumeError::BoundsExceedPeriod`] if `lambda_max - lambda_min`
    ///   exceeds the domain length
    pub fn with_config(
        cv: SharedCv<P>,
        lambda_min: f64,
        lambda_max: f64,
        domain: Option<PeriodicDomain>,
        config: PeriodicConfig,
    ) -> Result<Self, VolumeError> {
        if lambda_min.is_nan() || lambda_max.is_nan() {
            return Err(VolumeError::NaNBound);
        }

        let Some(domain) = domain else {
            return Ok(Self {
                cv,
                min: lambda_min,
                max: lambda_max,
                domain: None,
                inverted: lambda_min > lambda_max,
                config,
            });
        };

        if !lambda_min.is_finite() || !lambda_max.is_finite() {
            return Err(VolumeError::InvalidBounds {
                min: lambda_min,
                max: lambda_max,
            });
        }

        let span = lambda_max - lambda_min;
        let period = domain.len();
        if span > period {
            return Err(VolumeError::BoundsExceedPeriod { span, period });
        }

        let (min, max) = if span == period {
            debug!(
                "periodic interval [{}, {}] spans the whole domain [{}, {}]",
                lambda_min,
                lambda_max,
                domain.min(),
                domain.max()
            );
            (domain.min(), domain.max())
        } else {
            let min = domain.canonical(lambda_min);
            let max = domain.canonical(lambda_max);
            if min != lambda_min || max != lambda_max {
                debug!(
                    "periodic interval [{}, {}] normalized to [{}, {}]",
                    lambda_min, lambda_max, min, max
                );
            }
            (min, max)
        };

        Ok(Self {
            cv,
            min,
            max,
            domain: Some(domain),
            inverted: min > max,
            config,
        })
    }

    pub fn cv(&self) -> &SharedCv<P> {
        &self.cv
    }

    /// Normalized lower bound.
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Normalized upper bound.
    pub const fn max(&self) -> f64 {
        self.max
    }

    pub const fn domain(&self) -> Option<PeriodicDomain> {
        self.domain
    }

    pub fn period_len(&self) -> Option<f64> {
        self.domain.map(|d| d.len())
    }

    pub fn period_shift(&self) -> Option<f64> {
        self.domain.map(|d| d.shift())
    }

    /// Returns true if the interval wraps through the domain boundary.
    pub const fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub const fn config(&self) -> PeriodicConfig {
        self.config
    }

    /// Membership test for a raw CV value.
    pub fn contains(&self, value: f64) -> bool {
        let v = match self.domain {
            Some(domain) => domain.canonical(value),
            None => value,
        };
        let upper = self.config.upper_boundary;
        if self.inverted {
            upper.admits(v, self.max) || v >= self.min
        } else {
            self.min <= v && upper.admits(v, self.max)
        }
    }

    pub fn evaluate(&self, point: &P) -> bool {
        self.contains(self.cv.call(point))
    }
}

impl<P> PartialEq for LambdaVolumePeriodic<P> {
    fn eq(&self, other: &Self) -> bool {
        same_cv(&self.cv, &other.cv)
            && self.min == other.min
            && self.max == other.max
            && self.domain == other.domain
            && self.inverted == other.inverted
            && self.config == other.config
    }
}

impl<P> Eq for LambdaVolumePeriodic<P> {}

impl<P> Hash for LambdaVolumePeriodic<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cv.id().hash(state);
        hash_f64(self.min, state);
        hash_f64(self.max, state);
        self.domain.hash(state);
        self.inverted.hash(state);
        self.config.hash(state);
    }
}

impl<P> Display for LambdaVolumePeriodic<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.cv.name();
        let Some(domain) = self.domain else {
            return write!(
                f,
                "{{x|{}(x) [periodic] in [{}, {}]}}",
                name, self.min, self.max
            );
        };

        let shift = domain.shift();
        let len = domain.len();
        write!(f, "{{x|({}(x) - {}) % {} + {} in ", name, shift, len, shift)?;
        if self.inverted {
            write!(
                f,
                "[{}, {}] union [{}, {}]}}",
                shift,
                self.max,
                self.min,
                shift + len
            )
        } else {
            write!(f, "[{}, {}]}}", self.min, self.max)
        }
    }
}

impl<P> Debug for LambdaVolumePeriodic<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LambdaVolumePeriodic")
            .field("cv", &self.cv.name())
            .field("min", &self.min)
            .field("max", &self.max)
            .field("domain", &self.domain)
            .field("inverted", &self.inverted)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpperBoundary;
    use crate::cv::Identity;

    fn angle_domain() -> Option<PeriodicDomain> {
        Some(PeriodicDomain::new(-180.0, 180.0).unwrap())
    }

    fn periodic(min: f64, max: f64) -> LambdaVolumePeriodic<f64> {
        LambdaVolumePeriodic::new(Identity::new("Id").shared(), min, max, angle_domain()).unwrap()
    }

    #[test]
    fn domain_rejects_empty_or_reversed() {
        assert!(PeriodicDomain::new(180.0, -180.0).is_err());
        assert!(PeriodicDomain::new(0.0, 0.0).is_err());
        assert!(PeriodicDomain::new(0.0, f64::INFINITY).is_err());
        assert!(PeriodicDomain::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn canonical_maps_into_window() {
        let d = PeriodicDomain::new(-180.0, 180.0).unwrap();
        assert_eq!(d.canonical(210.0), -150.0);
        assert_eq!(d.canonical(-180.0), -180.0);
        assert_eq!(d.canonical(180.0), -180.0);
        assert_eq!(d.canonical(-540.0), -180.0);
        assert_eq!(d.canonical(719.0), -1.0);
        let c = d.canonical(-1e-18);
        assert!((-180.0..180.0).contains(&c));
    }

    #[test]
    fn normal_interval_and_images() {
        let vol = periodic(-150.0, 70.0);
        assert_eq!(vol.period_len(), Some(360.0));
        assert_eq!(vol.period_shift(), Some(-180.0));
        assert!(!vol.is_inverted());
        assert_eq!(vol.to_string(), "{x|(Id(x) - -180) % 360 + -180 in [-150, 70]}");
        for image in [-1.0, 0.0, 1.0] {
            let k = 360.0 * image;
            assert!(!vol.contains(-151.0 + k));
            assert!(!vol.contains(71.0 + k));
            assert!(vol.contains(-149.0 + k));
            assert!(vol.contains(69.0 + k));
            assert!(vol.contains(-150.0 + k));
            assert!(vol.contains(70.0 + k));
        }
    }

    #[test]
    fn inverted_interval_and_images() {
        let vol = periodic(70.0, -150.0);
        assert!(vol.is_inverted());
        assert_eq!(
            vol.to_string(),
            "{x|(Id(x) - -180) % 360 + -180 in [-180, -150] union [70, 180]}"
        );
        for image in [-1.0, 0.0, 1.0] {
            let k = 360.0 * image;
            assert!(!vol.contains(69.0 + k));
            assert!(!vol.contains(-149.0 + k));
            assert!(vol.contains(71.0 + k));
            assert!(vol.contains(-151.0 + k));
            assert!(vol.contains(70.0 + k));
            assert!(vol.contains(-150.0 + k));
        }
    }

    #[test]
    fn implicit_normal() {
        let vol =
            LambdaVolumePeriodic::new(Identity::new("Id").shared(), -150.0, 70.0, None).unwrap();
        assert_eq!(vol.to_string(), "{x|Id(x) [periodic] in [-150, 70]}");
        assert_eq!(vol.period_len(), None);
        assert!(!vol.contains(-151.0));
        assert!(!vol.contains(71.0));
        assert!(vol.contains(-149.0));
        assert!(vol.contains(69.0));
        assert!(vol.contains(-150.0));
        assert!(vol.contains(70.0));
    }

    #[test]
    fn implicit_inverted() {
        let vol =
            LambdaVolumePeriodic::new(Identity::new("Id").shared(), 70.0, -150.0, None).unwrap();
        assert!(vol.is_inverted());
        assert!(!vol.contains(69.0));
        assert!(!vol.contains(-149.0));
        assert!(vol.contains(71.0));
        assert!(vol.contains(-151.0));
        assert!(vol.contains(70.0));
        assert!(vol.contains(-150.0));
    }

    #[test]
    fn upper_bound_wraps_into_window() {
        let cv = Identity::new("Id").shared();
        let vol = LambdaVolumePeriodic::new(cv.clone(), 70.0, 210.0, angle_domain()).unwrap();
        assert_eq!(vol.min(), 70.0);
        assert_eq!(vol.max(), -150.0);
        assert!(vol.is_inverted());
        let direct = LambdaVolumePeriodic::new(cv, 70.0, -150.0, angle_domain()).unwrap();
        assert_eq!(vol, direct);
    }

    #[test]
    fn span_larger_than_period_fails() {
        let err = LambdaVolumePeriodic::new(Identity::new("Id").shared(), 90.0, 720.0, angle_domain())
            .unwrap_err();
        assert_eq!(
            err,
            VolumeError::BoundsExceedPeriod {
                span: 630.0,
                period: 360.0
            }
        );
    }

    #[test]
    fn span_equal_to_period_covers_domain() {
        let vol = periodic(0.0, 360.0);
        assert_eq!(vol.to_string(), "{x|(Id(x) - -180) % 360 + -180 in [-180, 180]}");
        assert!(!vol.is_inverted());
        for v in [0.0, 360.0, -180.0, 180.0, 1234.5] {
            assert!(vol.contains(v));
        }
    }

    #[test]
    fn infinite_bound_with_domain_fails() {
        let err = LambdaVolumePeriodic::new(
            Identity::new("Id").shared(),
            f64::INFINITY,
            0.0,
            angle_domain(),
        )
        .unwrap_err();
        assert!(matches!(err, VolumeError::InvalidBounds { .. }));
    }

    #[test]
    fn exclusive_upper_boundary() {
        let cfg = PeriodicConfig::new(UpperBoundary::Exclusive);
        let cv = Identity::new("Id").shared();
        let normal =
            LambdaVolumePeriodic::with_config(cv.clone(), -150.0, 70.0, angle_domain(), cfg)
                .unwrap();
        assert!(normal.contains(-150.0));
        assert!(!normal.contains(70.0));
        assert!(!normal.contains(430.0));

        let inverted =
            LambdaVolumePeriodic::with_config(cv.clone(), 70.0, -150.0, angle_domain(), cfg)
                .unwrap();
        assert!(inverted.contains(70.0));
        assert!(!inverted.contains(-150.0));
        assert!(inverted.contains(-151.0));

        let full =
            LambdaVolumePeriodic::with_config(cv, -180.0, 180.0, angle_domain(), cfg).unwrap();
        assert!(full.contains(180.0));
        assert!(full.contains(179.999));
    }

    #[test]
    fn boundary_policy_affects_equality() {
        let cv = Identity::new("Id").shared();
        let incl = LambdaVolumePeriodic::new(cv.clone(), 0.0, 10.0, angle_domain()).unwrap();
        let excl = LambdaVolumePeriodic::with_config(
            cv,
            0.0,
            10.0,
            angle_domain(),
            PeriodicConfig::new(UpperBoundary::Exclusive),
        )
        .unwrap();
        assert_ne!(incl, excl);
    }
}
