//! Port contract for the PE cell.
//!
//! Signal-level interface, matching the RTL pinout one-to-one:
//!
//! ```text
//! clk        in   clock      drives all sequential updates (rising edge)
//! rst_n      in   1-bit      synchronous reset, active low
//! en         in   1-bit      gates the compute/output pipeline
//! weight_ld  in   1-bit      write-enable for the weight latch
//! data_in    in   signed     operand / pass-through value
//! weight_in  in   signed     value to latch into the weight register
//! acc_in     in   signed     partial-sum addend
//! data_out   out  signed     registered, delayed copy of data_in
//! acc_out    out  signed     registered, weight·data_in + acc_in
//! ```
//!
//! The clock itself has no representation here: one call to
//! [`Pe::rising_edge`](crate::pe::Pe::rising_edge) *is* one rising edge.

/// Datapath word. 32-bit two's complement.
///
/// The RTL leaves the width open (anything ≥ 16 bits holds the exercised
/// operands); 32 bits gives a 16×16 product plus accumulation headroom.
/// Overflow wraps; see [`Pe::rising_edge`](crate::pe::Pe::rising_edge).
pub type Word = i32;

/// Datapath width in bits.
pub const WORD_BITS: u32 = Word::BITS;

/// Cycles from driving an operand pair to seeing its MAC result on
/// `acc_out`, with `en` held high: one cycle to compute, one to surface.
pub const MAC_LATENCY_CYCLES: u64 = 2;

/// Input lines as sampled by one rising clock edge.
///
/// `Default` is the power-on posture: reset asserted (`rst_n` low), all
/// other lines low/zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortState {
    /// Synchronous reset, active low. While low, every register clears
    /// and all other lines are ignored.
    pub rst_n: bool,
    /// Pipeline enable. Gates both the compute stage and the output stage.
    pub en: bool,
    /// Weight latch write-enable. Independent of `en`.
    pub weight_ld: bool,
    /// Operand / pass-through value.
    pub data_in: Word,
    /// Value latched into the weight register when `weight_ld` is high.
    pub weight_in: Word,
    /// Partial-sum addend.
    pub acc_in: Word,
}

impl PortState {
    /// Reset released, everything else deasserted. The PE holds state on
    /// such a cycle.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            rst_n: true,
            en: false,
            weight_ld: false,
            data_in: 0,
            weight_in: 0,
            acc_in: 0,
        }
    }

    /// One enabled compute cycle driving an operand pair.
    #[must_use]
    pub const fn compute(data_in: Word, acc_in: Word) -> Self {
        Self {
            rst_n: true,
            en: true,
            weight_ld: false,
            data_in,
            weight_in: 0,
            acc_in,
        }
    }

    /// One weight-load cycle. `en` stays low: the pipeline holds while
    /// the latch takes the new value.
    #[must_use]
    pub const fn load(weight_in: Word) -> Self {
        Self {
            rst_n: true,
            en: false,
            weight_ld: true,
            data_in: 0,
            weight_in,
            acc_in: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_power_on_reset() {
        let lines = PortState::default();
        assert!(!lines.rst_n);
        assert!(!lines.en);
        assert!(!lines.weight_ld);
    }

    #[test]
    fn helper_constructors() {
        assert!(PortState::idle().rst_n);
        assert!(PortState::compute(3, 0).en);
        let ld = PortState::load(5);
        assert!(ld.weight_ld && !ld.en);
        assert_eq!(ld.weight_in, 5);
    }

    #[test]
    fn word_width_holds_mac_headroom() {
        // 16×16-bit product plus carry must fit the chosen word
        assert!(WORD_BITS >= 32);
    }
}
