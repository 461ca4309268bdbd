//! Error types shared across the Mott workspace.
//!
//! Subsystem-local errors (geometry, store, run configuration) live in
//! their own crates; this module holds the errors that cross crate
//! boundaries through the transport seam.

use std::error::Error;
use std::fmt;

/// Errors from an external transport engine's per-step computation.
///
/// Returned by `TransportEngine::transport()` and treated as fatal for
/// the run by the driver — per-step processing has no recoverable error
/// path.
#[derive(Clone, Debug, PartialEq)]
pub enum TransportError {
    /// The engine's step computation failed.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// A computed per-step asymmetry left the legal `[-1, 1]` domain.
    AsymmetryOutOfRange {
        /// The offending value.
        value: f64,
    },
    /// A computed kinematic quantity was NaN or infinite.
    NonFiniteSample {
        /// Which quantity went non-finite.
        quantity: &'static str,
    },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::AsymmetryOutOfRange { value } => {
                write!(f, "asymmetry {value} outside [-1, 1]")
            }
            Self::NonFiniteSample { quantity } => {
                write!(f, "non-finite {quantity} in transport output")
            }
        }
    }
}

impl Error for TransportError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_problem() {
        let e = TransportError::AsymmetryOutOfRange { value: 1.5 };
        assert!(e.to_string().contains("1.5"));
        let e = TransportError::NonFiniteSample { quantity: "phi" };
        assert!(e.to_string().contains("phi"));
    }
}
