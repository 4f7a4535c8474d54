//! Interface trait and stage context for Rupture simulations.
//!
//! The [`Interface`] trait is the contract every interface condition
//! implements: frictional faults, bonded contacts and free surfaces
//! alike. The driver calls it once per Runge–Kutta stage through an
//! [`InterfaceContext`] that carries the block layer's boundary reader
//! and writer.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod guard;
pub mod interface;
pub mod registry;

pub use context::InterfaceContext;
pub use guard::StageGuard;
pub use interface::{Interface, InterfaceKind, PhaseCensus};
pub use registry::{validate_interfaces, RegistryError};
