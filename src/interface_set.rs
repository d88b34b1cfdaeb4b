//! Ordered families of interface volumes along a single collective variable.
//!
//! Path-sampling methods place a sequence of interfaces between two states,
//! each interface being the volume on one side of a CV value `λ_i`. An
//! [`InterfaceSet`] builds those volumes from a CV and its bounds and maps
//! between interface volumes and their `λ` values.

use log::debug;

use crate::cv::SharedCv;
use crate::volumes::{Volume, VolumeError};
use crate::Id;

/// Bounds given for one side of an interface set.
#[derive(Debug, Clone, PartialEq)]
pub enum Bounds {
    /// Same bound for every interface.
    Fixed(f64),
    /// One bound per interface.
    Each(Vec<f64>),
}

impl Bounds {
    fn len(&self) -> Option<usize> {
        match self {
            Bounds::Fixed(_) => None,
            Bounds::Each(values) => Some(values.len()),
        }
    }

    fn expand(&self, n: usize) -> Vec<f64> {
        match self {
            Bounds::Fixed(value) => vec![*value; n],
            Bounds::Each(values) => values.clone(),
        }
    }
}

impl From<f64> for Bounds {
    fn from(value: f64) -> Self {
        Bounds::Fixed(value)
    }
}

impl From<Vec<f64>> for Bounds {
    fn from(values: Vec<f64>) -> Self {
        Bounds::Each(values)
    }
}

impl From<&[f64]> for Bounds {
    fn from(values: &[f64]) -> Self {
        Bounds::Each(values.to_vec())
    }
}

/// Which bound moves from one interface to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceDirection {
    /// Fixed minimum, varying maximum: volumes grow with increasing `λ`.
    Increasing,
    /// Varying minimum, fixed maximum: volumes grow with decreasing `λ`.
    Decreasing,
    /// Both bounds vary; interfaces have no single `λ`.
    Mixed,
}

/// Sequence of interface volumes over one collective variable.
///
/// # Example
///
/// ```
/// use volumetra::{Identity, InterfaceSet};
///
/// let cv = Identity::new("x").shared();
/// let set = InterfaceSet::new(cv, f64::NEG_INFINITY, vec![0.0, 0.1, 0.2]).unwrap();
/// assert_eq!(set.len(), 3);
/// assert!(set.volume_for_lambda(0.1).unwrap().evaluate(&0.05));
/// ```
pub struct InterfaceSet<P> {
    id: Id,
    cv: SharedCv<P>,
    volumes: Vec<Volume<P>>,
    lambdas: Option<Vec<f64>>,
    direction: InterfaceDirection,
    period: Option<(f64, f64)>,
}

impl<P> InterfaceSet<P> {
    /// Creates non-periodic interfaces `[min_i, max_i]`.
    ///
    /// # Errors
    ///
    /// - [`VolumeError::InterfaceLengthMismatch`] if both bounds are lists
    ///   of different lengths
    /// - [`VolumeError::EmptyInterfaceSet`] if a list is empty
    /// - any error from [`Volume::interval`]
    pub fn new(
        cv: SharedCv<P>,
        minvals: impl Into<Bounds>,
        maxvals: impl Into<Bounds>,
    ) -> Result<Self, VolumeError> {
        Self::build(cv, minvals.into(), maxvals.into(), None)
    }

    /// Creates periodic interfaces over the domain `period`.
    pub fn periodic(
        cv: SharedCv<P>,
        minvals: impl Into<Bounds>,
        maxvals: impl Into<Bounds>,
        period: (f64, f64),
    ) -> Result<Self, VolumeError> {
        Self::build(cv, minvals.into(), maxvals.into(), Some(period))
    }

    fn build(
        cv: SharedCv<P>,
        minvals: Bounds,
        maxvals: Bounds,
        period: Option<(f64, f64)>,
    ) -> Result<Self, VolumeError> {
        let n = match (minvals.len(), maxvals.len()) {
            (Some(a), Some(b)) if a != b => {
                return Err(VolumeError::InterfaceLengthMismatch {
                    minvals: a,
                    maxvals: b,
                })
            }
            (Some(n), _) | (_, Some(n)) => n,
            (None, None) => 1,
        };
        if n == 0 {
            return Err(VolumeError::EmptyInterfaceSet);
        }

        let mins = minvals.expand(n);
        let maxs = maxvals.expand(n);
        let volumes = mins
            .iter()
            .zip(&maxs)
            .map(|(&min, &max)| match period {
                Some(period) => Volume::periodic(cv.clone(), min, max, Some(period)),
                None => Volume::interval(cv.clone(), min, max),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let (direction, lambdas) = if all_equal(&mins) {
            (InterfaceDirection::Increasing, Some(maxs))
        } else if all_equal(&maxs) {
            (InterfaceDirection::Decreasing, Some(mins))
        } else {
            (InterfaceDirection::Mixed, None)
        };

        debug!(
            "interface set over `{}`: {} interfaces, {:?}",
            cv.name(),
            n,
            direction
        );

        Ok(Self {
            id: crate::generate_id(),
            cv,
            volumes,
            lambdas,
            direction,
            period,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cv(&self) -> &SharedCv<P> {
        &self.cv
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    pub fn direction(&self) -> InterfaceDirection {
        self.direction
    }

    pub fn period(&self) -> Option<(f64, f64)> {
        self.period
    }

    pub fn volumes(&self) -> &[Volume<P>] {
        &self.volumes
    }

    /// The varying bound of each interface; `None` for mixed sets.
    pub fn lambdas(&self) -> Option<&[f64]> {
        self.lambdas.as_deref()
    }

    pub fn get(&self, index: usize) -> Option<&Volume<P>> {
        self.volumes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Volume<P>> {
        self.volumes.iter()
    }

    /// Returns the interface whose `λ` equals `lambda`.
    pub fn volume_for_lambda(&self, lambda: f64) -> Option<&Volume<P>> {
        let position = self.lambdas()?.iter().position(|&l| l == lambda)?;
        self.volumes.get(position)
    }

    /// Returns the `λ` of the interface structurally equal to `volume`.
    pub fn lambda_for_volume(&self, volume: &Volume<P>) -> Option<f64> {
        let position = self.volumes.iter().position(|v| v == volume)?;
        self.lambdas()?.get(position).copied()
    }
}

impl<'a, P> IntoIterator for &'a InterfaceSet<P> {
    type Item = &'a Volume<P>;
    type IntoIter = std::slice::Iter<'a, Volume<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.volumes.iter()
    }
}

fn all_equal(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}
