//! Structural equality and hashing of volumes.
//!
//! Two volumes are equal when they have the same variant and equal fields,
//! operands included. Combinator nodes carry a structural hash computed
//! once at construction, so comparing deep DAGs rejects most mismatches
//! early; matching pairs of shared nodes are walked only once.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::volume::{Volume, VolumeKind};

/// Hashes a variant tag together with already computed child hashes.
pub(super) fn combine_hash(kind: VolumeKind, parts: &[u64]) -> u64 {
    let mut hasher = DefaultHasher::new();
    kind.hash(&mut hasher);
    parts.hash(&mut hasher);
    hasher.finish()
}

/// Hashes a float so that `-0.0` and `0.0` collide, matching `==`.
pub(crate) fn hash_f64<H: Hasher>(value: f64, state: &mut H) {
    (value + 0.0).to_bits().hash(state);
}

impl<P> Volume<P> {
    /// Structural hash of this volume; equal volumes have equal hashes.
    ///
    /// O(1) for combinators (memoized), O(1) for leaves.
    pub fn structural_hash(&self) -> u64 {
        match self {
            Volume::Empty | Volume::Full => combine_hash(self.kind(), &[]),
            Volume::Interval(leaf) => {
                let mut hasher = DefaultHasher::new();
                leaf.hash(&mut hasher);
                combine_hash(self.kind(), &[hasher.finish()])
            }
            Volume::Periodic(leaf) => {
                let mut hasher = DefaultHasher::new();
                leaf.hash(&mut hasher);
                combine_hash(self.kind(), &[hasher.finish()])
            }
            Volume::And(ops) | Volume::Or(ops) | Volume::Xor(ops) | Volume::Sub(ops) => ops.hash,
            Volume::Not(neg) => neg.hash,
        }
    }

    /// Returns true if both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Volume::Empty, Volume::Empty) | (Volume::Full, Volume::Full) => true,
            (Volume::Interval(a), Volume::Interval(b)) => Arc::ptr_eq(a, b),
            (Volume::Periodic(a), Volume::Periodic(b)) => Arc::ptr_eq(a, b),
            (Volume::And(a), Volume::And(b))
            | (Volume::Or(a), Volume::Or(b))
            | (Volume::Xor(a), Volume::Xor(b))
            | (Volume::Sub(a), Volume::Sub(b)) => Arc::ptr_eq(a, b),
            (Volume::Not(a), Volume::Not(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<P> PartialEq for Volume<P> {
    /// Structural comparison over an explicit worklist of node pairs.
    ///
    /// Each distinct pair of combinator allocations is expanded once, so
    /// comparing two independently built DAGs with heavy sharing is linear
    /// in the number of distinct pairs, and deep chains do not recurse.
    fn eq(&self, other: &Self) -> bool {
        let mut expanded: HashSet<(*const (), *const ())> = HashSet::new();
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.ptr_eq(b) {
                continue;
            }
            match (a, b) {
                (Volume::Interval(x), Volume::Interval(y)) if x == y => {}
                (Volume::Periodic(x), Volume::Periodic(y)) if x == y => {}
                (Volume::And(x), Volume::And(y))
                | (Volume::Or(x), Volume::Or(y))
                | (Volume::Xor(x), Volume::Xor(y))
                | (Volume::Sub(x), Volume::Sub(y)) => {
                    if x.hash != y.hash {
                        return false;
                    }
                    let key = (Arc::as_ptr(x) as *const (), Arc::as_ptr(y) as *const ());
                    if expanded.insert(key) {
                        pending.push((&x.left, &y.left));
                        pending.push((&x.right, &y.right));
                    }
                }
                (Volume::Not(x), Volume::Not(y)) => {
                    if x.hash != y.hash {
                        return false;
                    }
                    let key = (Arc::as_ptr(x) as *const (), Arc::as_ptr(y) as *const ());
                    if expanded.insert(key) {
                        pending.push((&x.inner, &y.inner));
                    }
                }
                _ => return false,
            }
        }
        true
    }
}

impl<P> Eq for Volume<P> {}

impl<P> Hash for Volume<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}
