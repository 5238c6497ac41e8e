//! Core logic for the DriveSync steering wheel simulator.
//!
//! This crate contains platform-agnostic code shared between the desktop
//! simulator and the Pico 2 firmware:
//!
//! - [`physics`]: Discrete-time vehicle model (throttle/brake/gear to RPM and speed)
//! - [`steering`]: Encoder delta to steering angle mapping
//! - [`encoder`]: Interrupt-updated quadrature counter with atomic snapshots
//! - [`input`]: Edge detection, trigger ramps and the gearbox
//! - [`gate`]: Millisecond timing gates for the cooperative superloop
//! - [`telemetry`]: Fixed 16-byte serial frame encoder and stream decoder
//! - [`display`]: Fixed-width text rows for every screen
//! - [`panel`]: Text-cell renderer for `embedded-graphics` targets
//! - [`clock`]: Software wall clock
//! - [`leds`]: Four-rung LED ladder
//! - [`board`]: Collaborator trait implemented by each platform
//! - [`mode`]: Arming / Driving / Diagnostic state machine
//! - [`startup`]: Power-on animation and mode selection
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` and never allocates. Tests run on the host with `std`:
//!
//! ```bash
//! cargo test -p drivesync-common
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod board;
pub mod clock;
pub mod colors;
pub mod config;
pub mod display;
pub mod encoder;
pub mod gate;
pub mod input;
pub mod leds;
pub mod mode;
pub mod panel;
pub mod physics;
pub mod startup;
pub mod steering;
pub mod telemetry;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use board::{Board, Input, SimEvent};
pub use mode::{Controller, ModeKind};
pub use telemetry::{FRAME_LEN, FrameDecoder, FrameError, TelemetryFrame};
