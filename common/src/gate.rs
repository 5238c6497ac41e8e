//! Timing gates for the cooperative superloop.
//!
//! Every sub-loop that shares the superloop is rate-limited by a [`Gate`]: it
//! fires when strictly more than `period` milliseconds have passed since it
//! last fired, and then restarts from the current tick. Because the restart
//! point is `now` (not `last + period`), a slow pass shifts every later firing.
//!
//! Tick arithmetic wraps. [`Gate::force`] relies on that: it moves the last
//! firing into the future, so the elapsed time wraps to a huge value and the
//! gate fires on the next poll.

/// Rate limiter over a wrapping millisecond tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gate {
    last: u32,
    period: u32,
}

impl Gate {
    /// Create a gate that last fired at tick 0.
    pub const fn new(period: u32) -> Self { Self { last: 0, period } }

    /// Fire if more than `period` ms have elapsed; restarts from `now` on fire.
    pub fn ready(
        &mut self,
        now: u32,
    ) -> bool {
        if now.wrapping_sub(self.last) > self.period {
            self.last = now;
            true
        } else {
            false
        }
    }

    /// Make the gate fire on the next poll made within `period` ms of `now`.
    pub fn force(
        &mut self,
        now: u32,
    ) {
        self.last = now.wrapping_add(self.period);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
