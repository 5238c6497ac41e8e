//! Software wall clock.
//!
//! The clock is latched to a [`DateTime`] at a given tick and reads the time
//! of day by adding the elapsed ticks. Hours wrap at 24; the stored date is
//! reported back unchanged.

/// Milliseconds per day.
const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Time of day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl WallTime {
    /// Midnight.
    pub const MIDNIGHT: Self = Self {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Build from milliseconds since midnight (wraps at 24 h).
    pub const fn from_millis(ms: u64) -> Self {
        let secs = (ms % DAY_MS) / 1000;
        Self {
            hours: (secs / 3600) as u8,
            minutes: ((secs / 60) % 60) as u8,
            seconds: (secs % 60) as u8,
        }
    }

    /// Milliseconds since midnight.
    pub const fn as_millis(self) -> u64 {
        (self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64) * 1000
    }
}

/// Calendar date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Date {
    /// Years since 2000.
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub weekday: u8,
}

/// Full date and time, as written at boot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub date: Date,
    pub time: WallTime,
}

impl DateTime {
    /// All-zero date and time, the value written on power-up.
    pub const ZERO: Self = Self {
        date: Date {
            year: 0,
            month: 0,
            day: 0,
            weekday: 0,
        },
        time: WallTime::MIDNIGHT,
    };
}

/// Wall clock derived from the monotonic tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct SoftClock {
    reference: DateTime,
    set_at_ms: u32,
}

impl SoftClock {
    /// A clock reading midnight from tick 0.
    pub const fn new() -> Self {
        Self {
            reference: DateTime::ZERO,
            set_at_ms: 0,
        }
    }

    /// Latch `datetime` as the wall time at tick `now_ms`.
    pub fn set(
        &mut self,
        datetime: DateTime,
        now_ms: u32,
    ) {
        self.reference = datetime;
        self.set_at_ms = now_ms;
    }

    /// Time of day at tick `now_ms`.
    pub fn time(
        &self,
        now_ms: u32,
    ) -> WallTime {
        let elapsed = u64::from(now_ms.wrapping_sub(self.set_at_ms));
        WallTime::from_millis(self.reference.time.as_millis() + elapsed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
