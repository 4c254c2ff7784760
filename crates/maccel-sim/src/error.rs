//! Error types for bench operations

use maccel_pe::ports::Word;
use thiserror::Error;

/// Result type alias for bench operations
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors that can occur while driving the PE
#[derive(Debug, Error)]
pub enum SimError {
    /// A sampled output disagreed with a stimulus vector's expectation
    #[error("cycle {cycle}: {signal} mismatch: got {got}, expected {expected}")]
    Mismatch {
        /// Cycle count at which the output was sampled
        cycle: u64,
        /// Output line that mismatched (`acc_out` or `data_out`)
        signal: &'static str,
        /// Value the PE produced
        got: Word,
        /// Value the vector expected
        expected: Word,
    },

    /// A stimulus program with no vectors was submitted
    #[error("stimulus program is empty")]
    EmptyProgram,

    /// A conformance check failed
    #[error("check '{name}' failed: {message}")]
    CheckFailed {
        /// Name of the failing check
        name: String,
        /// What the check observed
        message: String,
    },
}

impl SimError {
    /// Create a mismatch error
    pub fn mismatch(cycle: u64, signal: &'static str, got: Word, expected: Word) -> Self {
        Self::Mismatch {
            cycle,
            signal,
            got,
            expected,
        }
    }

    /// Create a check failure error
    pub fn check_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CheckFailed {
            name: name.into(),
            message: message.into(),
        }
    }
}
