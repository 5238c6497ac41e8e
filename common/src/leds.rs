//! Four-rung LED ladder.
//!
//! Rung 0 is the bottom of the ladder (LED4 on the wheel PCB) and lights
//! first; rung 3 lights last. Boards map rungs to physical pins.

use crate::config::{ARMING_SEGMENT_MS, ARMING_SEGMENTS_PER_RUNG, RPM_PER_RUNG};

/// Number of rungs on the ladder.
pub const RUNGS: usize = 4;

/// Lit/unlit state of every rung, one bit per rung.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedBar(u8);

impl LedBar {
    /// Every rung dark.
    pub const OFF: Self = Self(0);

    /// Every rung lit.
    pub const ALL: Self = Self(0b1111);

    /// Build from per-rung states, bottom rung first.
    pub fn from_rungs(rungs: [bool; RUNGS]) -> Self {
        let bits = rungs
            .iter()
            .enumerate()
            .fold(0u8, |acc, (k, &lit)| if lit { acc | (1 << k) } else { acc });
        Self(bits)
    }

    /// Whether rung `k` is lit. Rungs past the top read as dark.
    #[inline]
    pub const fn is_lit(
        self,
        k: usize,
    ) -> bool {
        k < RUNGS && self.0 & (1 << k) != 0
    }

    /// Per-rung states, bottom rung first.
    pub fn rungs(self) -> [bool; RUNGS] { core::array::from_fn(|k| self.is_lit(k)) }

    /// Number of lit rungs.
    #[inline]
    pub const fn lit_count(self) -> u32 { self.0.count_ones() }

    /// Rev-counter ladder: rung k lights at `1600 * (k + 1)` RPM and above.
    pub fn rpm_ladder(rpm: i16) -> Self {
        let rpm = i32::from(rpm);
        Self::from_rungs(core::array::from_fn(|k| rpm >= i32::from(RPM_PER_RUNG) * (k as i32 + 1)))
    }

    /// Arming ladder: rung k lights once the hold has filled more than
    /// `3 * (k + 1)` progress segments.
    pub fn arming_ladder(held_ms: u32) -> Self {
        let segments = held_ms / ARMING_SEGMENT_MS;
        Self::from_rungs(core::array::from_fn(|k| segments > ARMING_SEGMENTS_PER_RUNG * (k as u32 + 1)))
    }

    /// Startup chase frame: only rung `step` lit.
    pub fn chase(step: u8) -> Self { Self::from_rungs(core::array::from_fn(|k| k == usize::from(step))) }

    /// Startup blink frame: all rungs lit on odd steps.
    pub const fn blink(step: u8) -> Self { if step % 2 == 1 { Self::ALL } else { Self::OFF } }
}

// =============================================================================
// Unit Tests
// =============================================================================
