//! Firmware library - host-testable pieces of the Pico 2 wheel firmware.
//!
//! The binary (`main.rs`) adds the embassy-rp peripherals, the encoder
//! interrupt tasks and the superloop on top of this library and
//! `drivesync-common`.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p drivesync-pico2 --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test -p drivesync-pico2 --lib --target x86_64-pc-windows-msvc    # Windows
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

// Pin map, polarities, ADC scaling, peripheral settings
pub mod config;
