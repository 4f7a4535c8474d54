//! Windowed binary output of interface and block fields.
//!
//! An [`OutputList`] holds the units declared under
//! `[rupture.outputlist]` in an input file. Each [`OutputUnit`] samples
//! one named field over a strided time and space window and appends the
//! samples as little-endian `f64` to its data file.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod list;
pub mod unit;
pub mod window;

pub use error::OutputError;
pub use list::{OutputList, OUTPUT_MARKER};
pub use unit::OutputUnit;
pub use window::{AxisWindow, OutputWindow};
