//! Quadrature encoder counter shared between interrupt context and the superloop.
//!
//! The counter is written from edge interrupts and read by the main loop.
//! `value` and `index` are packed into one `AtomicU32` so a read is always a
//! consistent snapshot of both halves, with no lock.
//!
//! Layout: `value` in the high 16 bits, `index` in the low 16 bits.

use core::sync::atomic::{AtomicU32, Ordering};

/// Point-in-time copy of the encoder counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderSnapshot {
    /// Signed position count; wraps at the 16-bit boundary.
    pub value: i16,
    /// Number of index (once-per-revolution) pulses seen.
    pub index: i16,
}

impl EncoderSnapshot {
    #[inline]
    const fn pack(self) -> u32 { ((self.value as u16 as u32) << 16) | self.index as u16 as u32 }

    #[inline]
    const fn unpack(word: u32) -> Self {
        Self {
            value: (word >> 16) as u16 as i16,
            index: word as u16 as i16,
        }
    }
}

/// Interrupt-safe encoder accumulator.
pub struct EncoderCounter {
    word: AtomicU32,
}

impl EncoderCounter {
    /// Create a counter at position 0 with no index pulses.
    pub const fn new() -> Self { Self { word: AtomicU32::new(0) } }

    /// Take a consistent snapshot of both counters.
    #[inline]
    pub fn snapshot(&self) -> EncoderSnapshot { EncoderSnapshot::unpack(self.word.load(Ordering::Acquire)) }

    /// Record a rising edge on channel A.
    ///
    /// Channel B high means the shaft turned counter-clockwise (count down).
    pub fn on_channel_a_rising(
        &self,
        channel_b_high: bool,
    ) {
        let delta: i16 = if channel_b_high { -1 } else { 1 };
        self.modify(|snap| EncoderSnapshot {
            value: snap.value.wrapping_add(delta),
            ..snap
        });
    }

    /// Record an index pulse.
    pub fn on_index(&self) {
        self.modify(|snap| EncoderSnapshot {
            index: snap.index.wrapping_add(1),
            ..snap
        });
    }

    /// Overwrite the position (bench tooling; the firmware never rewinds).
    pub fn set_value(
        &self,
        value: i16,
    ) {
        self.modify(|snap| EncoderSnapshot { value, ..snap });
    }

    fn modify(
        &self,
        f: impl Fn(EncoderSnapshot) -> EncoderSnapshot,
    ) {
        // The closure always returns Some, so fetch_update cannot fail
        let _ = self
            .word
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |word| Some(f(EncoderSnapshot::unpack(word)).pack()));
    }
}

impl Default for EncoderCounter {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let counter = EncoderCounter::new();
        assert_eq!(counter.snapshot(), EncoderSnapshot::default());
    }

    #[test]
    fn test_direction_from_channel_b() {
        let counter = EncoderCounter::new();
        counter.on_channel_a_rising(false);
        counter.on_channel_a_rising(false);
        counter.on_channel_a_rising(true);
        assert_eq!(counter.snapshot().value, 1);
    }

    #[test]
    fn test_negative_values_do_not_disturb_index() {
        let counter = EncoderCounter::new();
        counter.on_index();
        for _ in 0..5 {
            counter.on_channel_a_rising(true);
        }
        let snap = counter.snapshot();
        assert_eq!(snap.value, -5);
        assert_eq!(snap.index, 1);
    }

    #[test]
    fn test_value_wraps() {
        let counter = EncoderCounter::new();
        counter.set_value(i16::MAX);
        counter.on_channel_a_rising(false);
        assert_eq!(counter.snapshot().value, i16::MIN);
    }

    #[test]
    fn test_index_wrap_does_not_carry_into_value() {
        let counter = EncoderCounter::new();
        counter.set_value(7);
        for _ in 0..=u16::MAX {
            counter.on_index();
        }
        let snap = counter.snapshot();
        assert_eq!(snap.index, 0);
        assert_eq!(snap.value, 7);
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        use std::sync::Arc;
        use std::thread;

        let counter = Arc::new(EncoderCounter::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        counter.on_channel_a_rising(false);
                        counter.on_index();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = counter.snapshot();
        assert_eq!(snap.value, 4000);
        assert_eq!(snap.index, 4000);
    }
}
