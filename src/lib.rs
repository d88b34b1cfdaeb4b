//! volumetra - composable volume predicates over collective-variable space
//!
//! Volumes classify points of a simulation's order-parameter space into
//! named regions (states, interfaces, stopping conditions). Leaves are
//! intervals over a single collective variable, optionally periodic, and
//! compose through intersection, union, symmetric difference, difference
//! and complement.

pub mod config;
pub mod cv;
pub mod interface_set;
pub mod volumes;

pub use config::{PeriodicConfig, UpperBoundary};
pub use cv::{CollectiveVariable, CvFunction, Identity, SharedCv};
pub use interface_set::InterfaceSet;
pub use volumes::{NamedVolume, PeriodicDomain, Volume, VolumeError};

/// Identifier type used for collective variables and interface sets.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
