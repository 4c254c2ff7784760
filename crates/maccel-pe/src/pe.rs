//! PE register file and rising-edge semantics.
//!
//! Five registers, one writer: [`Pe::rising_edge`] computes every
//! next-state value from a consistent pre-edge snapshot and commits them
//! together, so readers between edges never observe a partial update.
//!
//! Priority per edge:
//!
//! 1. `rst_n` low — clear all five registers, ignore every other line.
//! 2. `weight_ld` — latch `weight_in`. The latch has its own write-enable
//!    and does not participate in the pipeline's `en` gating.
//! 3. `en` — advance both pipeline stages.
//! 4. otherwise — hold.
//!
//! When `weight_ld` and `en` are high on the same edge, the MAC of that
//! edge still uses the old weight; the newly latched value participates
//! from the next edge on.

use crate::ports::{PortState, Word};

/// The PE register file.
///
/// Constructed in the cleared state, identical to the state after a reset
/// cycle. Only [`rising_edge`](Self::rising_edge) mutates it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pe {
    /// Latched multiplicand. Persists until the next load or reset.
    weight: Word,
    /// Stage 1: partial MAC result, valid for one cycle before promotion.
    stage1_acc: Word,
    /// Stage 1: copy of `data_in`, paired with `stage1_acc`.
    stage1_data: Word,
    /// Output register: externally visible accumulator result.
    acc_out: Word,
    /// Output register: externally visible forwarded data.
    data_out: Word,
}

impl Pe {
    /// A cleared PE, as it stands after reset.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            weight: 0,
            stage1_acc: 0,
            stage1_data: 0,
            acc_out: 0,
            data_out: 0,
        }
    }

    /// Commit one rising clock edge.
    ///
    /// Every right-hand side below reads pre-edge state; there is no
    /// same-edge forwarding from stage 1 into the output registers, which
    /// is what gives `acc_out` its two-cycle latency.
    ///
    /// Arithmetic wraps at the word width, as fixed-width hardware
    /// registers do.
    pub fn rising_edge(&mut self, lines: &PortState) {
        if !lines.rst_n {
            *self = Self::new();
            return;
        }

        let next_weight = if lines.weight_ld {
            lines.weight_in
        } else {
            self.weight
        };

        if lines.en {
            let mac = self
                .weight
                .wrapping_mul(lines.data_in)
                .wrapping_add(lines.acc_in);
            self.acc_out = self.stage1_acc;
            self.data_out = self.stage1_data;
            self.stage1_acc = mac;
            self.stage1_data = lines.data_in;
        }

        self.weight = next_weight;
    }

    /// Registered accumulator output.
    #[must_use]
    pub const fn acc_out(&self) -> Word {
        self.acc_out
    }

    /// Registered pass-through output.
    #[must_use]
    pub const fn data_out(&self) -> Word {
        self.data_out
    }

    /// Currently latched weight.
    #[must_use]
    pub const fn weight(&self) -> Word {
        self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn released(pe: &mut Pe, cycles: usize) {
        for _ in 0..cycles {
            pe.rising_edge(&PortState::idle());
        }
    }

    #[test]
    fn reset_clears_all_registers() {
        let mut pe = Pe::new();
        pe.rising_edge(&PortState::load(7));
        pe.rising_edge(&PortState::compute(3, 1));
        pe.rising_edge(&PortState::compute(3, 1));
        assert_ne!(pe, Pe::new());

        pe.rising_edge(&PortState::default()); // rst_n low
        assert_eq!(pe, Pe::new());
    }

    #[test]
    fn reset_wins_over_weight_load() {
        let mut pe = Pe::new();
        let lines = PortState {
            rst_n: false,
            weight_ld: true,
            weight_in: 9,
            ..PortState::default()
        };
        pe.rising_edge(&lines);
        assert_eq!(pe.weight(), 0);
    }

    #[test]
    fn weight_latch_is_independent_of_enable() {
        let mut pe = Pe::new();
        pe.rising_edge(&PortState::load(5));
        assert_eq!(pe.weight(), 5);

        // Pipeline untouched by the load cycle
        assert_eq!(pe.acc_out(), 0);
        assert_eq!(pe.data_out(), 0);
    }

    #[test]
    fn two_cycle_mac_latency() {
        let mut pe = Pe::new();
        pe.rising_edge(&PortState::load(5));
        released(&mut pe, 1);

        pe.rising_edge(&PortState::compute(3, 0));
        // Computed, not yet surfaced
        assert_eq!(pe.acc_out(), 0);

        pe.rising_edge(&PortState::compute(3, 0));
        assert_eq!(pe.acc_out(), 15);
        assert_eq!(pe.data_out(), 3);
    }

    #[test]
    fn simultaneous_load_and_enable_uses_old_weight() {
        let mut pe = Pe::new();
        pe.rising_edge(&PortState::load(2));

        // Load 10 while computing: this edge's MAC must still use weight=2
        let lines = PortState {
            rst_n: true,
            en: true,
            weight_ld: true,
            data_in: 3,
            weight_in: 10,
            acc_in: 0,
        };
        pe.rising_edge(&lines);
        assert_eq!(pe.weight(), 10);

        pe.rising_edge(&PortState::compute(0, 0));
        assert_eq!(pe.acc_out(), 6, "MAC used pre-edge weight 2, not 10");
    }

    #[test]
    fn disabled_cycles_hold_everything() {
        let mut pe = Pe::new();
        pe.rising_edge(&PortState::load(4));
        pe.rising_edge(&PortState::compute(7, 10));
        pe.rising_edge(&PortState::compute(7, 10));
        assert_eq!(pe.acc_out(), 38);

        let before = pe;
        for junk in [99, -5, 0] {
            let lines = PortState {
                rst_n: true,
                en: false,
                weight_ld: false,
                data_in: junk,
                weight_in: 0,
                acc_in: junk,
            };
            pe.rising_edge(&lines);
            assert_eq!(pe, before, "register file changed while disabled");
        }
    }

    #[test]
    fn inputs_driven_while_disabled_leave_no_residue() {
        let mut pe = Pe::new();
        pe.rising_edge(&PortState::load(1));
        pe.rising_edge(&PortState::compute(8, 0));

        // Drive different operands with en low, then re-enable with
        // known operands; the first surfaced value must come from the
        // stage-1 state of the last *enabled* cycle.
        let lines = PortState {
            rst_n: true,
            en: false,
            weight_ld: false,
            data_in: 123,
            weight_in: 0,
            acc_in: 456,
        };
        pe.rising_edge(&lines);
        pe.rising_edge(&PortState::compute(0, 0));
        assert_eq!(pe.acc_out(), 8, "stale stage-1 value must be 1·8+0");
        assert_eq!(pe.data_out(), 8);
    }

    #[test]
    fn mac_wraps_at_word_width() {
        let mut pe = Pe::new();
        pe.rising_edge(&PortState::load(Word::MAX));
        pe.rising_edge(&PortState::compute(2, 0));
        pe.rising_edge(&PortState::compute(0, 0));
        assert_eq!(pe.acc_out(), Word::MAX.wrapping_mul(2));
    }

    #[test]
    fn negative_operands() {
        let mut pe = Pe::new();
        pe.rising_edge(&PortState::load(-4));
        pe.rising_edge(&PortState::compute(7, 10));
        pe.rising_edge(&PortState::compute(0, 0));
        assert_eq!(pe.acc_out(), -18);
    }
}
