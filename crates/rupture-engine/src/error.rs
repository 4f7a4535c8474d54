//! The error a run reports to its abort point.

use std::error::Error;
use std::fmt;

use rupture_core::{BlockError, ConfigError, InterfaceError};
use rupture_output::OutputError;

/// Any failure that ends a run.
///
/// Every component returns its own error type; the driver wraps them
/// here so [`run_or_abort`](crate::run_or_abort) has one thing to log.
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// Configuration was rejected before the first step.
    Config(ConfigError),
    /// An interface failed while enforcing its condition.
    Interface {
        /// Name of the failing interface.
        name: String,
        /// What went wrong.
        reason: InterfaceError,
    },
    /// Writing or closing an output unit failed.
    Output(OutputError),
    /// The block layer failed.
    Block(BlockError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::Interface { name, reason } => write!(f, "interface '{name}': {reason}"),
            Self::Output(e) => write!(f, "output: {e}"),
            Self::Block(e) => write!(f, "block layer: {e}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Interface { reason, .. } => Some(reason),
            Self::Output(e) => Some(e),
            Self::Block(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<OutputError> for RunError {
    fn from(e: OutputError) -> Self {
        Self::Output(e)
    }
}

impl From<BlockError> for RunError {
    fn from(e: BlockError) -> Self {
        Self::Block(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_are_the_source() {
        let err = RunError::from(BlockError::ExchangeFailed {
            reason: "peer gone".into(),
        });
        assert_eq!(err.to_string(), "block layer: block exchange failed: peer gone");
        assert!(err.source().is_some());
    }
}
