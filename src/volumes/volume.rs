//! Composable volume predicates over collective-variable space.

use std::fmt::{self, Debug};
use std::mem;
use std::sync::Arc;

use super::error::VolumeError;
use super::lambda::LambdaVolume;
use super::periodic::{LambdaVolumePeriodic, PeriodicDomain};
use crate::config::PeriodicConfig;
use crate::cv::SharedCv;

/// Volume node: leaf (interval predicate) or combinator (boolean algebra).
///
/// Volumes form an immutable DAG:
/// - **Empty** / **Full**: bottom and top of the algebra
/// - **Interval** / **Periodic**: membership of one CV value in a range
/// - **And** / **Or** / **Xor** / **Sub**: binary combinators
/// - **Not**: complement
///
/// Children are shared through `Arc`, so a leaf may appear under many
/// parents and a volume can be evaluated from many threads at once.
/// Combinators are built through [`Volume::and_with`] and friends (or the
/// `&`, `|`, `^`, `-`, `!` operators), which fold trivial cases before
/// allocating a node.
///
/// # Depth
///
/// Construction, evaluation, equality, rendering, tree analysis, graph
/// export and drop all run on explicit stacks, so arbitrarily deep chains
/// (e.g. a union folded over thousands of leaves) are fine. The `Debug`
/// output and the optional `serde` serialization recurse, and are limited
/// by the thread's stack size (a few thousand levels on the default
/// stack).
pub enum Volume<P> {
    Empty,
    Full,
    Interval(Arc<LambdaVolume<P>>),
    Periodic(Arc<LambdaVolumePeriodic<P>>),
    And(Arc<Operands<P>>),
    Or(Arc<Operands<P>>),
    Xor(Arc<Operands<P>>),
    Sub(Arc<Operands<P>>),
    Not(Arc<Negation<P>>),
}

/// Variant tag of a [`Volume`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeKind {
    Empty,
    Full,
    Interval,
    Periodic,
    And,
    Or,
    Xor,
    Sub,
    Not,
}

impl VolumeKind {
    /// Infix token used when rendering binary combinators.
    pub const fn operator(self) -> Option<&'static str> {
        match self {
            VolumeKind::And => Some("and"),
            VolumeKind::Or => Some("or"),
            VolumeKind::Xor => Some("xor"),
            VolumeKind::Sub => Some("and not"),
            _ => None,
        }
    }
}

/// Operands of a binary combinator, with their memoized structural hash.
pub struct Operands<P> {
    pub(super) left: Volume<P>,
    pub(super) right: Volume<P>,
    pub(super) hash: u64,
}

impl<P> Operands<P> {
    pub fn left(&self) -> &Volume<P> {
        &self.left
    }

    pub fn right(&self) -> &Volume<P> {
        &self.right
    }
}

/// Operand of a complement node, with its memoized structural hash.
pub struct Negation<P> {
    pub(super) inner: Volume<P>,
    pub(super) hash: u64,
}

impl<P> Negation<P> {
    pub fn inner(&self) -> &Volume<P> {
        &self.inner
    }
}

impl<P> Volume<P> {
    /// The volume containing no point.
    pub const fn empty() -> Self {
        Volume::Empty
    }

    /// The volume containing every point.
    pub const fn full() -> Self {
        Volume::Full
    }

    /// Creates `{x | min <= cv(x) <= max}`.
    ///
    /// # Errors
    ///
    /// See [`LambdaVolume::new`].
    pub fn interval(cv: SharedCv<P>, min: f64, max: f64) -> Result<Self, VolumeError> {
        Ok(Volume::Interval(Arc::new(LambdaVolume::new(cv, min, max)?)))
    }

    /// Creates a periodic interval with the default boundary policy.
    ///
    /// `period` is `(period_min, period_max)`; `None` selects the implicit
    /// mode, where the CV is assumed to return canonical values.
    ///
    /// # Errors
    ///
    /// See [`PeriodicDomain::new`] and [`LambdaVolumePeriodic::with_config`].
    pub fn periodic(
        cv: SharedCv<P>,
        min: f64,
        max: f64,
        period: Option<(f64, f64)>,
    ) -> Result<Self, VolumeError> {
        Self::periodic_with_config(cv, min, max, period, PeriodicConfig::default())
    }

    /// Creates a periodic interval with an explicit boundary policy.
    pub fn periodic_with_config(
        cv: SharedCv<P>,
        min: f64,
        max: f64,
        period: Option<(f64, f64)>,
        config: PeriodicConfig,
    ) -> Result<Self, VolumeError> {
        let domain = period
            .map(|(period_min, period_max)| PeriodicDomain::new(period_min, period_max))
            .transpose()?;
        let leaf = LambdaVolumePeriodic::with_config(cv, min, max, domain, config)?;
        Ok(Volume::Periodic(Arc::new(leaf)))
    }

    /// Allocates a binary combinator node without simplification.
    pub(super) fn binary(kind: VolumeKind, left: Volume<P>, right: Volume<P>) -> Self {
        let hash = super::eq::combine_hash(kind, &[left.structural_hash(), right.structural_hash()]);
        let operands = Arc::new(Operands { left, right, hash });
        match kind {
            VolumeKind::And => Volume::And(operands),
            VolumeKind::Or => Volume::Or(operands),
            VolumeKind::Xor => Volume::Xor(operands),
            VolumeKind::Sub => Volume::Sub(operands),
            other => unreachable!("{:?} is not a binary combinator", other),
        }
    }

    /// Allocates a complement node without simplification.
    pub(super) fn complement(inner: Volume<P>) -> Self {
        let hash = super::eq::combine_hash(VolumeKind::Not, &[inner.structural_hash()]);
        Volume::Not(Arc::new(Negation { inner, hash }))
    }

    pub fn kind(&self) -> VolumeKind {
        match self {
            Volume::Empty => VolumeKind::Empty,
            Volume::Full => VolumeKind::Full,
            Volume::Interval(_) => VolumeKind::Interval,
            Volume::Periodic(_) => VolumeKind::Periodic,
            Volume::And(_) => VolumeKind::And,
            Volume::Or(_) => VolumeKind::Or,
            Volume::Xor(_) => VolumeKind::Xor,
            Volume::Sub(_) => VolumeKind::Sub,
            Volume::Not(_) => VolumeKind::Not,
        }
    }

    /// Returns true if `point` lies inside this volume.
    ///
    /// Total and side-effect free; the only work besides boolean logic is
    /// calling the leaves' collective variables. Binary combinators
    /// short-circuit where the result is already decided. Runs on an
    /// explicit work stack, so nesting depth is bounded by memory only.
    pub fn evaluate(&self, point: &P) -> bool {
        let mut steps = vec![Step::Visit(self)];
        // value of the most recently completed subvolume
        let mut result = false;
        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(node) => match node {
                    Volume::Empty => result = false,
                    Volume::Full => result = true,
                    Volume::Interval(leaf) => result = leaf.evaluate(point),
                    Volume::Periodic(leaf) => result = leaf.evaluate(point),
                    Volume::And(ops) | Volume::Or(ops) | Volume::Xor(ops) | Volume::Sub(ops) => {
                        steps.push(Step::Right(node.kind(), &ops.right));
                        steps.push(Step::Visit(&ops.left));
                    }
                    Volume::Not(neg) => {
                        steps.push(Step::Negate);
                        steps.push(Step::Visit(&neg.inner));
                    }
                },
                Step::Right(kind, right) => {
                    let decided = match kind {
                        VolumeKind::And | VolumeKind::Sub => !result,
                        VolumeKind::Or => result,
                        _ => false,
                    };
                    if !decided {
                        steps.push(Step::Combine(kind, result));
                        steps.push(Step::Visit(right));
                    }
                }
                Step::Combine(kind, left) => {
                    result = match kind {
                        VolumeKind::And => left && result,
                        VolumeKind::Or => left || result,
                        VolumeKind::Xor => left != result,
                        VolumeKind::Sub => left && !result,
                        _ => result,
                    }
                }
                Step::Negate => result = !result,
            }
        }
        result
    }

    /// Returns `(left, right)` if this is a binary combinator.
    pub fn operands(&self) -> Option<(&Volume<P>, &Volume<P>)> {
        match self {
            Volume::And(ops) | Volume::Or(ops) | Volume::Xor(ops) | Volume::Sub(ops) => {
                Some((&ops.left, &ops.right))
            }
            _ => None,
        }
    }

    /// Returns the complemented volume if this is a `Not` node.
    pub fn negated(&self) -> Option<&Volume<P>> {
        match self {
            Volume::Not(neg) => Some(&neg.inner),
            _ => None,
        }
    }

    pub fn as_interval(&self) -> Option<&LambdaVolume<P>> {
        match self {
            Volume::Interval(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn as_periodic(&self) -> Option<&LambdaVolumePeriodic<P>> {
        match self {
            Volume::Periodic(leaf) => Some(leaf),
            _ => None,
        }
    }
}

/// Pending work of [`Volume::evaluate`].
enum Step<'a, P> {
    Visit(&'a Volume<P>),
    /// Left operand is done; evaluate the right one unless decided.
    Right(VolumeKind, &'a Volume<P>),
    /// Right operand is done; combine with the stored left value.
    Combine(VolumeKind, bool),
    Negate,
}

impl<P> Drop for Operands<P> {
    fn drop(&mut self) {
        if self.left.is_combinator() || self.right.is_combinator() {
            release(vec![
                mem::replace(&mut self.left, Volume::Empty),
                mem::replace(&mut self.right, Volume::Empty),
            ]);
        }
    }
}

impl<P> Drop for Negation<P> {
    fn drop(&mut self) {
        if self.inner.is_combinator() {
            release(vec![mem::replace(&mut self.inner, Volume::Empty)]);
        }
    }
}

/// Drops uniquely owned combinator chains iteratively.
///
/// Nodes still referenced elsewhere only lose one strong count.
fn release<P>(mut pending: Vec<Volume<P>>) {
    while let Some(volume) = pending.pop() {
        match volume {
            Volume::And(ops) | Volume::Or(ops) | Volume::Xor(ops) | Volume::Sub(ops) => {
                if let Some(mut ops) = Arc::into_inner(ops) {
                    pending.push(mem::replace(&mut ops.left, Volume::Empty));
                    pending.push(mem::replace(&mut ops.right, Volume::Empty));
                }
            }
            Volume::Not(neg) => {
                if let Some(mut neg) = Arc::into_inner(neg) {
                    pending.push(mem::replace(&mut neg.inner, Volume::Empty));
                }
            }
            _ => {}
        }
    }
}

impl<P> Clone for Volume<P> {
    fn clone(&self) -> Self {
        match self {
            Volume::Empty => Volume::Empty,
            Volume::Full => Volume::Full,
            Volume::Interval(leaf) => Volume::Interval(Arc::clone(leaf)),
            Volume::Periodic(leaf) => Volume::Periodic(Arc::clone(leaf)),
            Volume::And(ops) => Volume::And(Arc::clone(ops)),
            Volume::Or(ops) => Volume::Or(Arc::clone(ops)),
            Volume::Xor(ops) => Volume::Xor(Arc::clone(ops)),
            Volume::Sub(ops) => Volume::Sub(Arc::clone(ops)),
            Volume::Not(neg) => Volume::Not(Arc::clone(neg)),
        }
    }
}

impl<P> Debug for Volume<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Volume::Empty => f.write_str("Empty"),
            Volume::Full => f.write_str("Full"),
            Volume::Interval(leaf) => f.debug_tuple("Interval").field(leaf).finish(),
            Volume::Periodic(leaf) => f.debug_tuple("Periodic").field(leaf).finish(),
            Volume::And(ops) | Volume::Or(ops) | Volume::Xor(ops) | Volume::Sub(ops) => f
                .debug_struct(&format!("{:?}", self.kind()))
                .field("left", &ops.left)
                .field("right", &ops.right)
                .finish(),
            Volume::Not(neg) => f.debug_tuple("Not").field(&neg.inner).finish(),
        }
    }
}
