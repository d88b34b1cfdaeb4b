//! Collective-variable contract consumed by the volume algebra.
//!
//! A collective variable (CV) maps an opaque simulation point to a real
//! number. Volumes never compute CVs themselves; they hold a shared handle
//! and call it during evaluation.

use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::Id;

/// Named, callable mapping from a point `P` to a real value.
///
/// # Contract
///
/// Implementations should:
/// - Return the same value for the same point (volumes assume purity)
/// - Keep `id()` stable for the lifetime of the object; leaf equality is
///   decided by it, not by `name()`
pub trait CollectiveVariable<P>: Send + Sync + Debug {
    /// Unique identifier of this CV.
    fn id(&self) -> &str;

    /// Display name used when rendering volumes, e.g. `Id` in `Id(x)`.
    fn name(&self) -> &str;

    /// Evaluates the CV at `point`.
    fn call(&self, point: &P) -> f64;
}

/// Shared handle to a collective variable, as held by volume leaves.
pub type SharedCv<P> = Arc<dyn CollectiveVariable<P>>;

/// Returns true if both handles refer to the same collective variable.
pub(crate) fn same_cv<P>(a: &SharedCv<P>, b: &SharedCv<P>) -> bool {
    Arc::ptr_eq(a, b) || a.id() == b.id()
}

/// Collective variable backed by a closure.
///
/// Each instance is assigned a unique auto-generated ID upon creation, so
/// two functions with the same display name remain distinguishable.
///
/// # Example
///
/// ```
/// use volumetra::{CvFunction, Volume};
///
/// let x = CvFunction::new("x", |p: &[f64; 2]| p[0]).shared();
/// let state = Volume::interval(x, -1.0, 1.0).unwrap();
/// assert!(state.evaluate(&[0.5, 10.0]));
/// ```
pub struct CvFunction<P> {
    id: Id,
    name: String,
    f: Arc<dyn Fn(&P) -> f64 + Send + Sync>,
}

impl<P> CvFunction<P> {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&P) -> f64 + Send + Sync + 'static,
    {
        Self {
            id: crate::generate_id(),
            name: name.into(),
            f: Arc::new(f),
        }
    }

    /// Wraps this function into a [`SharedCv`] handle.
    pub fn shared(self) -> SharedCv<P>
    where
        P: 'static,
    {
        Arc::new(self)
    }
}

impl<P> Clone for CvFunction<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            f: Arc::clone(&self.f),
        }
    }
}

impl<P> Debug for CvFunction<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CvFunction")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<P> CollectiveVariable<P> for CvFunction<P> {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, point: &P) -> f64 {
        (self.f)(point)
    }
}

/// Scalar identity CV: the point is its own order parameter.
#[derive(Debug, Clone)]
pub struct Identity {
    id: Id,
    name: String,
}

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: crate::generate_id(),
            name: name.into(),
        }
    }

    pub fn shared(self) -> SharedCv<f64> {
        Arc::new(self)
    }
}

impl CollectiveVariable<f64> for Identity {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, point: &f64) -> f64 {
        *point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_cv_calls_closure() {
        let cv = CvFunction::new("sum", |p: &(f64, f64)| p.0 + p.1);
        assert_eq!(cv.call(&(1.5, 2.0)), 3.5);
        assert_eq!(cv.name(), "sum");
    }

    #[test]
    fn ids_are_unique_per_instance() {
        let a = Identity::new("Id");
        let b = Identity::new("Id");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.name(), b.name());
    }

    #[test]
    fn clones_share_identity() {
        let a = CvFunction::new("neg", |x: &f64| -x);
        let b = a.clone();
        assert_eq!(a.id(), b.id());
        assert!(same_cv(&a.shared(), &b.shared()));
    }

    #[test]
    fn distinct_cvs_with_same_name_differ() {
        let a = Identity::new("Id").shared();
        let b = Identity::new("Id").shared();
        assert!(!same_cv(&a, &b));
        assert!(same_cv(&a, &a.clone()));
    }

    #[test]
    fn debug_omits_closure() {
        let cv = CvFunction::new("phi", |x: &f64| *x);
        let s = format!("{:?}", cv);
        assert!(s.contains("phi"));
        assert!(s.contains("CvFunction"));
    }
}
