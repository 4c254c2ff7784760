// SPDX-License-Identifier: AGPL-3.0-only

//! PE conformance suite.
//!
//! Every timing property the RTL bench pinned down, runnable as a named
//! check against the model:
//!
//! | # | Check | Claim |
//! |---|-------|-------|
//! | 1 | reset | outputs are zero after reset releases |
//! | 2 | weight latch | a one-cycle `weight_ld` pulse persists: 5·3+0 = 15 |
//! | 3 | mac | non-zero partial sum: 4·7+10 = 38 |
//! | 4 | passthrough | `data_in` = 42 reaches `data_out` after two edges |
//! | 5 | enable gating | `en` low freezes outputs against arbitrary inputs |
//! | 6 | latency | `acc_out` at cycle t reflects operands of cycle t−2 |
//! | 7 | reset idempotence | 3-cycle and 7-cycle resets leave identical state |
//!
//! Each check runs on a fresh bench. The suite aggregates pass/fail; the
//! CLI turns a non-empty failure count into process exit 1.

use tracing::debug;

use crate::bench::TestBench;
use crate::error::{Result, SimError};

/// Outcome of one conformance check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Whether the check passed.
    pub passed: bool,
    /// What the check observed.
    pub message: String,
}

impl CheckResult {
    fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
        }
    }
}

/// Named conformance checks with aggregated results.
#[derive(Debug, Default)]
pub struct ConformanceSuite {
    results: Vec<(&'static str, CheckResult)>,
}

impl ConformanceSuite {
    /// Run the full suite.
    #[must_use]
    pub fn run_all() -> Self {
        let mut suite = Self::default();
        suite.run("reset clears outputs", check_reset);
        suite.run("weight latch persistence", check_weight_latch);
        suite.run("mac accumulate", check_mac_accumulate);
        suite.run("data passthrough", check_passthrough);
        suite.run("enable gating holds outputs", check_enable_gating);
        suite.run("two-cycle latency invariant", check_latency);
        suite.run("reset idempotence", check_reset_idempotence);
        suite
    }

    fn run(&mut self, name: &'static str, check: fn() -> CheckResult) {
        let result = check();
        debug!(name, passed = result.passed, "{}", result.message);
        self.results.push((name, result));
    }

    /// All results in execution order.
    #[must_use]
    pub fn results(&self) -> &[(&'static str, CheckResult)] {
        &self.results
    }

    /// Number of passing checks.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.passed).count()
    }

    /// Number of failing checks.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    /// True when every check passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// The first failure as an error, for callers that want `?`.
    ///
    /// # Errors
    ///
    /// [`SimError::CheckFailed`] naming the first failing check.
    pub fn into_result(self) -> Result<()> {
        match self.results.into_iter().find(|(_, r)| !r.passed) {
            Some((name, r)) => Err(SimError::check_failed(name, r.message)),
            None => Ok(()),
        }
    }
}

fn fresh_bench() -> TestBench {
    let mut bench = TestBench::new();
    bench.reset(3);
    bench
}

fn check_reset() -> CheckResult {
    let bench = fresh_bench();
    if bench.acc_out() == 0 && bench.data_out() == 0 {
        CheckResult::pass("data_out=0 acc_out=0 after reset release")
    } else {
        CheckResult::fail(format!(
            "outputs not cleared: data_out={} acc_out={}",
            bench.data_out(),
            bench.acc_out()
        ))
    }
}

fn check_weight_latch() -> CheckResult {
    let mut bench = fresh_bench();
    bench.load_weight(5);
    bench.idle(); // latch must survive a hold cycle
    bench.stream(3, 0);
    bench.stream(3, 0);
    if bench.acc_out() == 15 {
        CheckResult::pass("latched weight 5 gave 5·3+0 = 15")
    } else {
        CheckResult::fail(format!("expected acc_out=15, got {}", bench.acc_out()))
    }
}

fn check_mac_accumulate() -> CheckResult {
    let mut bench = fresh_bench();
    bench.load_weight(4);
    bench.stream(7, 10);
    bench.stream(7, 10);
    if bench.acc_out() == 38 {
        CheckResult::pass("4·7+10 = 38")
    } else {
        CheckResult::fail(format!("expected acc_out=38, got {}", bench.acc_out()))
    }
}

fn check_passthrough() -> CheckResult {
    let mut bench = fresh_bench();
    bench.load_weight(9); // must not affect data_out
    bench.stream(42, 13);
    bench.stream(42, 13);
    if bench.data_out() == 42 {
        CheckResult::pass("data_in=42 surfaced on data_out")
    } else {
        CheckResult::fail(format!("expected data_out=42, got {}", bench.data_out()))
    }
}

fn check_enable_gating() -> CheckResult {
    let mut bench = fresh_bench();
    bench.load_weight(2);
    bench.stream(3, 0);
    bench.stream(3, 0);
    let held = bench.acc_out();

    // en low, inputs driven to junk for three cycles
    bench.lines_mut().en = false;
    bench.lines_mut().data_in = 99;
    bench.lines_mut().acc_in = 99;
    for _ in 0..3 {
        bench.tick();
        if bench.acc_out() != held {
            return CheckResult::fail(format!(
                "acc_out moved while disabled: {} → {} at cycle {}",
                held,
                bench.acc_out(),
                bench.cycle()
            ));
        }
    }
    CheckResult::pass(format!("acc_out held at {held} across 3 disabled cycles"))
}

fn check_latency() -> CheckResult {
    let mut bench = fresh_bench();
    let weight = 3;
    bench.load_weight(weight);

    // Stream distinct operand pairs; after each edge past the second,
    // acc_out must equal the MAC of the pair driven two cycles earlier.
    let pairs: [(i32, i32); 6] = [(1, 0), (2, 5), (-3, 1), (7, 10), (0, -4), (6, 6)];
    for (i, &(data, acc)) in pairs.iter().enumerate() {
        bench.stream(data, acc);
        if i >= 1 {
            let (d_prev, a_prev) = pairs[i - 1];
            let expected = weight * d_prev + a_prev;
            if bench.acc_out() != expected {
                return CheckResult::fail(format!(
                    "acc_out={} but operands of two cycles back give {expected}",
                    bench.acc_out()
                ));
            }
        }
    }
    CheckResult::pass("acc_out tracked operands at two-cycle delay over 6 pairs")
}

fn check_reset_idempotence() -> CheckResult {
    let mut short = TestBench::new();
    let mut long = TestBench::new();
    short.reset(3);
    long.reset(7);

    for bench in [&mut short, &mut long] {
        bench.load_weight(4);
        bench.stream(7, 10);
        bench.stream(7, 10);
    }

    if short.pe() == long.pe() {
        CheckResult::pass("3-cycle and 7-cycle resets converge to identical state")
    } else {
        CheckResult::fail(format!(
            "diverged: short acc_out={}, long acc_out={}",
            short.acc_out(),
            long.acc_out()
        ))
    }
}
