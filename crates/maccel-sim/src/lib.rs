//! Test bench and conformance suite for the maccel PE.
//!
//! [`maccel_pe`] models the silicon; this crate drives it. The bench owns
//! a [`Pe`](maccel_pe::pe::Pe) and plays the role the clock and stimulus
//! process play in an RTL simulation: set input lines, commit a rising
//! edge, sample the registered outputs. Sampling mid-update is impossible
//! by construction.
//!
//! # Quick start
//!
//! ```
//! use maccel_sim::TestBench;
//!
//! let mut bench = TestBench::new();
//! bench.reset(3);
//! bench.load_weight(5);
//!
//! bench.stream(3, 0); // drive data_in=3, acc_in=0, en high
//! bench.stream(3, 0); // second edge surfaces the result
//! assert_eq!(bench.acc_out(), 15);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod bench;
pub mod conformance;
mod error;
mod stimulus;
mod trace;

pub use bench::TestBench;
pub use conformance::{CheckResult, ConformanceSuite};
pub use error::{Result, SimError};
pub use stimulus::{run_program, Vector};
pub use trace::{Trace, TraceSample};

/// Commonly used types.
pub mod prelude {
    pub use crate::{run_program, Result, SimError, TestBench, Trace, Vector};
    pub use maccel_pe::pe::Pe;
    pub use maccel_pe::ports::{PortState, Word};
}
