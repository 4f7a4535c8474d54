//! Core types and traits for the Rupture fault-interface solver.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared across the workspace: point and
//! block identifiers, local-frame boundary field types, interface
//! geometry, error types, the boundary reader/writer traits, and the
//! plain-text input section scanner.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod geometry;
pub mod id;
pub mod input;
pub mod traits;

pub use error::{BlockError, ConfigError, InterfaceError, SolveError};
pub use field::{
    BoundaryFieldPair, BoundaryFields, FaultMode, FieldView, Impedance, InterfaceFields,
    LocalVector,
};
pub use geometry::{InterfaceGeometry, Patch};
pub use id::{BlockId, InterfaceId, PointKey};
pub use input::{InputFile, Section};
pub use traits::{BlockLayer, BoundaryReader, BoundaryWriter, EmptyFieldSource, FieldSource};
