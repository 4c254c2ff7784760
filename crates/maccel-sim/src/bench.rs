// SPDX-License-Identifier: AGPL-3.0-only

//! Cycle-driving test bench.
//!
//! `TestBench` stands in for the clock generator and stimulus process of
//! an RTL simulation: it holds the currently driven input lines, commits
//! rising edges one at a time, and exposes the registered outputs for
//! sampling *between* edges only. There is no way to observe the register
//! file mid-update: [`Pe::rising_edge`] commits atomically and the bench
//! samples after it returns.

use maccel_pe::pe::Pe;
use maccel_pe::ports::{PortState, Word};
use tracing::{debug, trace};

use crate::trace::Trace;

/// Test bench owning one PE and its input lines.
///
/// Constructed with the PE cleared and reset still asserted (power-on
/// posture). Call [`reset`](Self::reset) before anything else; the
/// conformance scenarios all do.
#[derive(Debug, Default)]
pub struct TestBench {
    pe: Pe,
    lines: PortState,
    cycle: u64,
    trace: Trace,
}

impl TestBench {
    /// New bench, PE cleared, reset asserted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently driven input lines.
    #[must_use]
    pub fn lines(&self) -> &PortState {
        &self.lines
    }

    /// Mutable access to the input lines, for per-signal driving.
    pub fn lines_mut(&mut self) -> &mut PortState {
        &mut self.lines
    }

    /// Replace all input lines at once.
    pub fn drive(&mut self, lines: PortState) {
        self.lines = lines;
    }

    /// Commit one rising clock edge with the currently driven lines.
    pub fn tick(&mut self) {
        self.pe.rising_edge(&self.lines);
        self.cycle += 1;
        self.trace
            .record(self.cycle, self.lines, self.pe.acc_out(), self.pe.data_out());
        trace!(
            cycle = self.cycle,
            rst_n = self.lines.rst_n,
            en = self.lines.en,
            weight_ld = self.lines.weight_ld,
            acc_out = self.pe.acc_out(),
            data_out = self.pe.data_out(),
            "edge"
        );
    }

    /// Commit `n` rising edges without changing the lines.
    pub fn ticks(&mut self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Hold synchronous reset low for `cycles` edges, then release it and
    /// settle for one more edge. All data lines are cleared for the
    /// duration, mirroring the RTL bench's reset procedure.
    pub fn reset(&mut self, cycles: u64) {
        debug!(cycles, "reset");
        self.lines = PortState::default(); // rst_n low, everything cleared
        self.ticks(cycles);
        self.lines.rst_n = true;
        self.tick();
    }

    /// Pulse `weight_ld` for exactly one edge, latching `weight`.
    ///
    /// The pipeline holds during the pulse (`en` is driven low).
    pub fn load_weight(&mut self, weight: Word) {
        debug!(weight, "weight load");
        self.drive(PortState::load(weight));
        self.tick();
        self.lines.weight_ld = false;
    }

    /// Drive one enabled compute edge with the given operand pair.
    pub fn stream(&mut self, data_in: Word, acc_in: Word) {
        self.drive(PortState::compute(data_in, acc_in));
        self.tick();
    }

    /// Deassert `en` and commit one hold edge.
    pub fn idle(&mut self) {
        self.lines.en = false;
        self.lines.weight_ld = false;
        self.tick();
    }

    /// Registered accumulator output, as of the last committed edge.
    #[must_use]
    pub fn acc_out(&self) -> Word {
        self.pe.acc_out()
    }

    /// Registered pass-through output, as of the last committed edge.
    #[must_use]
    pub fn data_out(&self) -> Word {
        self.pe.data_out()
    }

    /// Edges committed since construction.
    #[must_use]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// The register file, for whole-state comparisons in tests.
    #[must_use]
    pub fn pe(&self) -> &Pe {
        &self.pe
    }

    /// Per-cycle trace captured so far.
    #[must_use]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_bench_is_cleared() {
        let bench = TestBench::new();
        assert_eq!(bench.acc_out(), 0);
        assert_eq!(bench.data_out(), 0);
        assert_eq!(bench.cycle(), 0);
    }

    #[test]
    fn reset_counts_cycles_including_settle_edge() {
        let mut bench = TestBench::new();
        bench.reset(3);
        assert_eq!(bench.cycle(), 4);
        assert!(bench.lines().rst_n);
    }

    #[test]
    fn weight_load_pulse_is_one_edge() {
        let mut bench = TestBench::new();
        bench.reset(3);
        bench.load_weight(5);
        assert!(!bench.lines().weight_ld);
        assert_eq!(bench.pe().weight(), 5);
    }

    #[test]
    fn stream_surfaces_after_two_edges() {
        let mut bench = TestBench::new();
        bench.reset(3);
        bench.load_weight(5);
        bench.stream(3, 0);
        assert_eq!(bench.acc_out(), 0);
        bench.stream(3, 0);
        assert_eq!(bench.acc_out(), 15);
    }

    #[test]
    fn trace_records_every_edge() {
        let mut bench = TestBench::new();
        bench.reset(3);
        bench.ticks(2);
        assert_eq!(bench.trace().len() as u64, bench.cycle());
    }
}
