//! Time-stepping driver for Rupture simulations.
//!
//! [`Simulation`] advances a [`BlockLayer`](rupture_core::BlockLayer)
//! and a list of [`Interface`](rupture_interface::Interface)s through a
//! low-storage Runge–Kutta [`TimeScheme`], sampling the
//! [`OutputList`](rupture_output::OutputList) between steps.
//! [`run_or_abort`] is the one place a failed run is terminated.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod comm;
pub mod config;
pub mod error;
pub mod metrics;
pub mod scheme;
pub mod simulation;

pub use catalog::FieldCatalog;
pub use comm::{run_or_abort, run_or_abort_with, Communicator, SerialCommunicator};
pub use config::{SimulationConfig, DEFAULT_RK_ORDER};
pub use error::RunError;
pub use metrics::StepMetrics;
pub use scheme::{Stage, TimeScheme};
pub use simulation::Simulation;
