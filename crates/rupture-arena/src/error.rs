//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use rupture_core::{ConfigError, PointKey};

/// Errors that can occur while populating an arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// A point was inserted twice.
    DuplicateKey {
        /// The repeated key.
        key: PointKey,
    },
    /// The arena is full.
    CapacityExceeded {
        /// Number of entries requested.
        requested: usize,
        /// Maximum number of entries.
        capacity: usize,
    },
    /// A field name was registered twice in a [`FieldStore`](crate::FieldStore).
    DuplicateField {
        /// The repeated name.
        name: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey { key } => write!(f, "duplicate point: {key}"),
            Self::CapacityExceeded {
                requested,
                capacity,
            } => write!(
                f,
                "arena capacity exceeded: requested {requested} points, capacity {capacity}"
            ),
            Self::DuplicateField { name } => write!(f, "duplicate field name '{name}'"),
        }
    }
}

impl Error for ArenaError {}

impl From<ArenaError> for ConfigError {
    fn from(e: ArenaError) -> Self {
        ConfigError::Geometry {
            reason: e.to_string(),
        }
    }
}
