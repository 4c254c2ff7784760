//! Per-cycle trace capture.
//!
//! The bench records one sample per committed edge: the input lines the
//! edge sampled and the registered outputs it left behind. The in-memory
//! trace replaces a waveform dump for a design this small; `render`
//! produces the aligned table the CLI prints.

use maccel_pe::ports::{PortState, Word};

/// One committed edge: driven lines plus post-edge outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceSample {
    /// Cycle count after the edge (first edge is cycle 1).
    pub cycle: u64,
    /// Input lines the edge sampled.
    pub lines: PortState,
    /// `acc_out` after the edge.
    pub acc_out: Word,
    /// `data_out` after the edge.
    pub data_out: Word,
}

/// Trace of every edge a bench has committed.
#[derive(Debug, Default)]
pub struct Trace {
    samples: Vec<TraceSample>,
}

impl Trace {
    /// Append one sample.
    pub(crate) fn record(&mut self, cycle: u64, lines: PortState, acc_out: Word, data_out: Word) {
        self.samples.push(TraceSample {
            cycle,
            lines,
            acc_out,
            data_out,
        });
    }

    /// All samples, oldest first.
    #[must_use]
    pub fn samples(&self) -> &[TraceSample] {
        &self.samples
    }

    /// Number of recorded edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if no edge has been committed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Render the trace as an aligned text table.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from(
            "cycle  rst_n  en  w_ld   data_in  weight_in    acc_in |  data_out   acc_out\n",
        );
        for s in &self.samples {
            out.push_str(&format!(
                "{:>5}  {:>5}  {:>2}  {:>4}  {:>8}  {:>9}  {:>8} | {:>9} {:>9}\n",
                s.cycle,
                u8::from(s.lines.rst_n),
                u8::from(s.lines.en),
                u8::from(s.lines.weight_ld),
                s.lines.data_in,
                s.lines.weight_in,
                s.lines.acc_in,
                s.data_out,
                s.acc_out,
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_every_cycle() {
        let mut trace = Trace::default();
        trace.record(1, PortState::default(), 0, 0);
        trace.record(2, PortState::compute(7, 10), 38, 7);
        let table = trace.render();
        assert_eq!(table.lines().count(), 3); // header + 2 samples
        assert!(table.contains("38"));
    }

    #[test]
    fn empty_trace() {
        let trace = Trace::default();
        assert!(trace.is_empty());
        assert_eq!(trace.render().lines().count(), 1);
    }
}
