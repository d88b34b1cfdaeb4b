//! Volumes carrying a human-readable name, e.g. states `A` and `B`.

use std::fmt::{self, Debug, Display};
use std::ops::Deref;

use super::volume::Volume;

/// A volume with a display name.
///
/// Evaluates exactly like the wrapped volume and displays as its name;
/// the full expression stays available through [`Volume::render`] on the
/// dereferenced volume.
pub struct NamedVolume<P> {
    name: String,
    volume: Volume<P>,
}

impl<P> NamedVolume<P> {
    pub fn new(name: impl Into<String>, volume: Volume<P>) -> Self {
        Self {
            name: name.into(),
            volume,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn volume(&self) -> &Volume<P> {
        &self.volume
    }

    pub fn into_volume(self) -> Volume<P> {
        self.volume
    }
}

impl<P> Volume<P> {
    /// Attaches a display name to this volume.
    pub fn named(&self, name: impl Into<String>) -> NamedVolume<P> {
        NamedVolume::new(name, self.clone())
    }
}

impl<P> Deref for NamedVolume<P> {
    type Target = Volume<P>;

    fn deref(&self) -> &Volume<P> {
        &self.volume
    }
}

impl<P> Clone for NamedVolume<P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            volume: self.volume.clone(),
        }
    }
}

impl<P> PartialEq for NamedVolume<P> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.volume == other.volume
    }
}

impl<P> Eq for NamedVolume<P> {}

impl<P> Display for NamedVolume<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<P> Debug for NamedVolume<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedVolume")
            .field("name", &self.name)
            .field("volume", &self.volume)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::cv::Identity;
    use crate::volumes::Volume;

    #[test]
    fn named_state_behaves_like_volume() {
        let cv = Identity::new("inc").shared();
        let state_a = Volume::interval(cv.clone(), f64::NEG_INFINITY, 0.0)
            .unwrap()
            .named("A");
        let state_b = Volume::interval(cv, 1.0, f64::INFINITY).unwrap().named("B");

        assert_eq!(state_a.to_string(), "A");
        assert_eq!(state_a.render(), "{x|inc(x) in [-inf, 0]}");
        assert!(state_a.evaluate(&-0.5));
        assert!(!state_a.evaluate(&0.5));

        let either = state_a.volume() | state_b.volume();
        assert!(either.evaluate(&2.0));
        assert!(!either.evaluate(&0.5));
    }

    #[test]
    fn equality_includes_name() {
        let cv = Identity::new("Id").shared();
        let v = Volume::interval(cv, 0.0, 1.0).unwrap();
        assert_eq!(v.named("A"), v.named("A"));
        assert_ne!(v.named("A"), v.named("B"));
        assert_eq!(v.named("A").into_volume(), v);
    }
}
