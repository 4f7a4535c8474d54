//! Per-point state arenas and packed field storage for Rupture interfaces.
//!
//! Two containers live here:
//!
//! - [`PointArena`] holds one value per interface grid point, keyed by
//!   [`PointKey`](rupture_core::PointKey). Iteration order is insertion
//!   order, so a slot index ([`PointHandle`]) doubles as an index into
//!   per-point parameter tables.
//! - [`FieldStore`] packs a set of named output fields of one shape into
//!   a single contiguous `Vec<f64>` with an offset table, and exposes
//!   them through [`FieldSource`](rupture_core::FieldSource).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field_store;
pub mod handle;
pub mod point_arena;

pub use error::ArenaError;
pub use field_store::FieldStore;
pub use handle::PointHandle;
pub use point_arena::PointArena;
