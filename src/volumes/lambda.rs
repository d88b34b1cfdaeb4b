//! Non-periodic interval leaf.

use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};

use super::error::VolumeError;
use super::hash_f64;
use crate::cv::{same_cv, SharedCv};

/// Volume `{x | min <= cv(x) <= max}`, both bounds inclusive.
///
/// Boundary points are always inside, so adjacent intervals sharing an
/// endpoint never leave a gap between them. Infinite bounds are allowed.
pub struct LambdaVolume<P> {
    cv: SharedCv<P>,
    min: f64,
    max: f64,
}

impl<P> LambdaVolume<P> {
    /// Creates the interval `[min, max]` over `cv`.
    ///
    /// # Errors
    ///
    /// - [`VolumeError::NaNBound`] if either bound is NaN
    /// - [`VolumeError::InvalidBounds`] if `min > max`; non-periodic
    ///   intervals cannot wrap
    pub fn new(cv: SharedCv<P>, min: f64, max: f64) -> Result<Self, VolumeError> {
        if min.is_nan() || max.is_nan() {
            return Err(VolumeError::NaNBound);
        }
        if min > max {
            return Err(VolumeError::InvalidBounds { min, max });
        }
        Ok(Self { cv, min, max })
    }

    pub fn cv(&self) -> &SharedCv<P> {
        &self.cv
    }

    pub const fn min(&self) -> f64 {
        self.min
    }

    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Returns true if `value` ∈ `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn evaluate(&self, point: &P) -> bool {
        self.contains(self.cv.call(point))
    }
}

impl<P> PartialEq for LambdaVolume<P> {
    fn eq(&self, other: &Self) -> bool {
        same_cv(&self.cv, &other.cv) && self.min == other.min && self.max == other.max
    }
}

impl<P> Eq for LambdaVolume<P> {}

impl<P> Hash for LambdaVolume<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cv.id().hash(state);
        hash_f64(self.min, state);
        hash_f64(self.max, state);
    }
}

impl<P> Display for LambdaVolume<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{x|{}(x) in [{}, {}]}}",
            self.cv.name(),
            self.min,
            self.max
        )
    }
}

impl<P> Debug for LambdaVolume<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LambdaVolume")
            .field("cv", &self.cv.name())
            .field("min", &self.min)
            .field("max", &self.max)
            .finish()
    }
}
