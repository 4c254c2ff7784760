//! Stimulus vectors with expected-output checking.
//!
//! A [`Vector`] is one cycle of driven input lines plus optional
//! expectations on the registered outputs. [`run_program`] plays a slice
//! of vectors through a bench, sampling after each edge and stopping at
//! the first mismatch. The cycle number of the mismatch is preserved in
//! the error, matching the drive-edge-assert cadence of an RTL bench.

use maccel_pe::ports::{PortState, Word};
use tracing::debug;

use crate::bench::TestBench;
use crate::error::{Result, SimError};

/// One cycle of stimulus: input lines plus optional output expectations,
/// checked after the edge commits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vector {
    /// Input lines to drive for this cycle.
    pub lines: PortState,
    /// Expected `acc_out` after the edge, if any.
    pub expect_acc: Option<Word>,
    /// Expected `data_out` after the edge, if any.
    pub expect_data: Option<Word>,
}

impl Vector {
    /// A vector that drives lines and checks nothing.
    #[must_use]
    pub const fn drive(lines: PortState) -> Self {
        Self {
            lines,
            expect_acc: None,
            expect_data: None,
        }
    }

    /// Add an `acc_out` expectation.
    #[must_use]
    pub const fn expect_acc(mut self, value: Word) -> Self {
        self.expect_acc = Some(value);
        self
    }

    /// Add a `data_out` expectation.
    #[must_use]
    pub const fn expect_data(mut self, value: Word) -> Self {
        self.expect_data = Some(value);
        self
    }
}

/// Run a stimulus program to completion, or to the first mismatch.
///
/// # Errors
///
/// [`SimError::EmptyProgram`] for a program with no vectors;
/// [`SimError::Mismatch`] with the offending cycle number when a sampled
/// output disagrees with an expectation.
pub fn run_program(bench: &mut TestBench, program: &[Vector]) -> Result<()> {
    if program.is_empty() {
        return Err(SimError::EmptyProgram);
    }

    for vector in program {
        bench.drive(vector.lines);
        bench.tick();

        if let Some(expected) = vector.expect_acc {
            let got = bench.acc_out();
            if got != expected {
                return Err(SimError::mismatch(bench.cycle(), "acc_out", got, expected));
            }
        }
        if let Some(expected) = vector.expect_data {
            let got = bench.data_out();
            if got != expected {
                return Err(SimError::mismatch(bench.cycle(), "data_out", got, expected));
            }
        }
    }

    debug!(vectors = program.len(), "stimulus program passed");
    Ok(())
}
