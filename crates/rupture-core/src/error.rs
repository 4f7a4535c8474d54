//! Error types for the Rupture solver.
//!
//! Organized by failure class: configuration errors detected at
//! construction, numerical failures of the constitutive solve, and
//! per-point failures raised while enforcing an interface condition, and
//! failures reported by the block layer.
//! All of them are fatal to the run; the top-level driver decides how
//! to terminate.

use std::error::Error;
use std::fmt;

use crate::id::PointKey;

/// Errors detected while reading or validating configuration.
///
/// Raised at construction time: missing input sections, unreadable or
/// malformed files, out-of-range parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The input file has no line equal to the section marker.
    MissingSection {
        /// The marker that was searched for.
        marker: String,
    },
    /// The file ended in the middle of a declaration.
    UnexpectedEof {
        /// Section being read when the file ended.
        section: String,
    },
    /// A file could not be opened or read.
    Io {
        /// Path of the file.
        path: String,
        /// Description of the I/O failure.
        reason: String,
    },
    /// A line could not be parsed.
    Parse {
        /// File (or section) containing the line.
        source: String,
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// A parameter is outside its valid range.
    InvalidParameter {
        /// Description of the violated constraint.
        reason: String,
    },
    /// Interface geometry is inconsistent.
    Geometry {
        /// Description of the inconsistency.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSection { marker } => {
                write!(f, "input file has no '{marker}' section")
            }
            Self::UnexpectedEof { section } => {
                write!(f, "unexpected end of file while reading '{section}'")
            }
            Self::Io { path, reason } => write!(f, "cannot read '{path}': {reason}"),
            Self::Parse {
                source,
                line,
                reason,
            } => write!(f, "{source}:{line}: {reason}"),
            Self::InvalidParameter { reason } => write!(f, "invalid parameter: {reason}"),
            Self::Geometry { reason } => write!(f, "invalid interface geometry: {reason}"),
        }
    }
}

impl Error for ConfigError {}

/// Failure of a constitutive root solve.
#[derive(Clone, Debug, PartialEq)]
pub enum SolveError {
    /// The iterative slip-rate solve did not converge.
    NoConvergence {
        /// Iterations performed.
        iterations: u32,
        /// Residual `|phi - eta v - strength(v)|` at the last iterate.
        residual: f64,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoConvergence {
                iterations,
                residual,
            } => write!(
                f,
                "slip rate solve did not converge after {iterations} iterations (residual {residual:e})"
            ),
        }
    }
}

impl Error for SolveError {}

/// Errors raised while enforcing an interface condition.
///
/// Every variant carries the interface name and point key so the failure
/// can be located; a failure at any point is fatal to the whole run.
#[derive(Clone, Debug, PartialEq)]
pub enum InterfaceError {
    /// The block layer supplied no boundary fields for a point.
    MissingBoundary {
        /// Interface name.
        interface: String,
        /// Point with no boundary data.
        point: PointKey,
    },
    /// A non-finite value was read or produced.
    NonFinite {
        /// Interface name.
        interface: String,
        /// Point where the value appeared.
        point: PointKey,
        /// Which quantity was non-finite.
        quantity: &'static str,
        /// Simulation time of the stage.
        time: f64,
        /// Time step index.
        step: u64,
    },
    /// An impedance was zero, negative, or non-finite.
    InvalidImpedance {
        /// Interface name.
        interface: String,
        /// Point with the bad impedance.
        point: PointKey,
        /// Simulation time of the stage.
        time: f64,
        /// Time step index.
        step: u64,
    },
    /// The friction solve failed.
    Solve {
        /// Interface name.
        interface: String,
        /// Point where the solve failed.
        point: PointKey,
        /// Underlying solve error.
        reason: SolveError,
    },
}

impl fmt::Display for InterfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBoundary { interface, point } => {
                write!(f, "interface '{interface}': no boundary fields for {point}")
            }
            Self::NonFinite {
                interface,
                point,
                quantity,
                time,
                step,
            } => write!(
                f,
                "interface '{interface}': non-finite {quantity} at {point}, t = {time}, step {step}"
            ),
            Self::InvalidImpedance {
                interface,
                point,
                time,
                step,
            } => write!(
                f,
                "interface '{interface}': invalid impedance at {point}, t = {time}, step {step}"
            ),
            Self::Solve {
                interface,
                point,
                reason,
            } => write!(f, "interface '{interface}': at {point}: {reason}"),
        }
    }
}

impl Error for InterfaceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Solve { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Failure reported by the block layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockError {
    /// Neighbour exchange failed.
    ExchangeFailed {
        /// Description of the failure.
        reason: String,
    },
    /// A bulk stage operation failed.
    StageFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExchangeFailed { reason } => write!(f, "block exchange failed: {reason}"),
            Self::StageFailed { reason } => write!(f, "block stage failed: {reason}"),
        }
    }
}

impl Error for BlockError {}
