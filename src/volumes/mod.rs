//! The volume algebra: interval leaves over collective variables and their
//! boolean combinations.

pub mod error;
pub mod graph;
pub mod lambda;
pub mod named;
pub mod periodic;
pub mod volume;

mod eq;
mod ops;
mod render;
#[cfg(feature = "serde")]
mod serialize;
mod simplify;
mod tree;

pub use error::VolumeError;
pub use graph::{Operand, VolumeGraph};
pub use lambda::LambdaVolume;
pub use named::NamedVolume;
pub use periodic::{LambdaVolumePeriodic, PeriodicDomain};
pub use volume::{Negation, Operands, Volume, VolumeKind};

pub(crate) use eq::hash_f64;
