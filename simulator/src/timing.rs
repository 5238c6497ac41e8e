//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in `no_std`
//! environments, so they are defined here rather than in the common crate.

use std::time::Duration;

/// Window refresh interval (~50 FPS). Input events are pumped at the same rate.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Sleep between superloop passes, so the bench doesn't spin a core at 100%.
///
/// Well under the 2 ms control cadence.
pub const POLL_INTERVAL: Duration = Duration::from_micros(250);
