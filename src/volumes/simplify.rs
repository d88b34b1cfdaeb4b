//! Combinator construction with algebraic folding.
//!
//! Rules are applied before a node is allocated, in this order:
//! 1. identity / annihilator folding (`Empty`, `Full`)
//! 2. idempotence under structural equality (`x & x`, `x | x`, `x ^ x`, `x - x`)
//! 3. double negation (`!!x`)
//!
//! Nothing deeper (De Morgan, distributivity) is attempted; anything else
//! becomes a combinator node over the shared operands.

use log::trace;

use super::volume::{Volume, VolumeKind};

impl<P> Volume<P> {
    /// Intersection: points inside both volumes.
    pub fn and_with(&self, other: &Volume<P>) -> Volume<P> {
        match (self, other) {
            (Volume::Empty, _) | (_, Volume::Empty) => folded("and", Volume::Empty),
            (Volume::Full, x) | (x, Volume::Full) => folded("and", x.clone()),
            (x, y) if x == y => folded("and", x.clone()),
            (x, y) => Volume::binary(VolumeKind::And, x.clone(), y.clone()),
        }
    }

    /// Union: points inside either volume.
    pub fn or_with(&self, other: &Volume<P>) -> Volume<P> {
        match (self, other) {
            (Volume::Full, _) | (_, Volume::Full) => folded("or", Volume::Full),
            (Volume::Empty, x) | (x, Volume::Empty) => folded("or", x.clone()),
            (x, y) if x == y => folded("or", x.clone()),
            (x, y) => Volume::binary(VolumeKind::Or, x.clone(), y.clone()),
        }
    }

    /// Symmetric difference: points inside exactly one of the volumes.
    pub fn xor_with(&self, other: &Volume<P>) -> Volume<P> {
        match (self, other) {
            (Volume::Empty, x) | (x, Volume::Empty) => folded("xor", x.clone()),
            (x, y) if x == y => folded("xor", Volume::Empty),
            (x, y) => Volume::binary(VolumeKind::Xor, x.clone(), y.clone()),
        }
    }

    /// Difference: points inside `self` but not inside `other`.
    pub fn sub_with(&self, other: &Volume<P>) -> Volume<P> {
        match (self, other) {
            (Volume::Empty, _) | (_, Volume::Full) => folded("sub", Volume::Empty),
            (x, Volume::Empty) => folded("sub", x.clone()),
            (x, y) if x == y => folded("sub", Volume::Empty),
            (x, y) => Volume::binary(VolumeKind::Sub, x.clone(), y.clone()),
        }
    }

    /// Complement: points outside this volume.
    pub fn negate(&self) -> Volume<P> {
        match self {
            Volume::Empty => folded("not", Volume::Full),
            Volume::Full => folded("not", Volume::Empty),
            Volume::Not(neg) => folded("not", neg.inner().clone()),
            x => Volume::complement(x.clone()),
        }
    }
}

fn folded<P>(op: &str, result: Volume<P>) -> Volume<P> {
    trace!("folded `{}` combinator to {:?}", op, result.kind());
    result
}
