//! Errors raised while writing output units.

use std::error::Error;
use std::fmt;

/// Failure of an output write or close.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputError {
    /// A data, time or metadata file could not be created or written.
    Io {
        /// Path of the file.
        path: String,
        /// Description of the I/O failure.
        reason: String,
    },
    /// No field source provides the unit's field.
    UnknownField {
        /// Output unit name.
        unit: String,
        /// Requested field name.
        field: String,
    },
    /// The unit's spatial window reaches past the field's extent.
    WindowOutOfBounds {
        /// Output unit name.
        unit: String,
        /// Axis (0, 1 or 2) that overflows.
        axis: usize,
        /// Largest index the window requests.
        max: usize,
        /// Extent of the field along that axis.
        extent: usize,
    },
}

impl OutputError {
    pub(crate) fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, reason } => write!(f, "cannot write '{path}': {reason}"),
            Self::UnknownField { unit, field } => {
                write!(f, "output unit '{unit}': unknown field '{field}'")
            }
            Self::WindowOutOfBounds {
                unit,
                axis,
                max,
                extent,
            } => write!(
                f,
                "output unit '{unit}': window index {max} on axis {axis} exceeds extent {extent}"
            ),
        }
    }
}

impl Error for OutputError {}
