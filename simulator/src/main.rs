//! DriveSync steering wheel simulator for Windows/Desktop.
//!
//! Runs the same boot sequence and superloop as the Pico 2 firmware, against
//! an `embedded-graphics-simulator` window and keyboard-driven controls.
//! Decoded telemetry and state machine events are printed to stdout.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod board;
mod keys;
mod timing;

use std::{env, thread};

use drivesync_common::Controller;

use crate::board::SimBoard;
use crate::keys::HELP;
use crate::timing::POLL_INTERVAL;

fn main() {
    let developer = env::args().skip(1).any(|arg| arg == "--developer");
    println!("{HELP}");

    let mut board = SimBoard::new(developer);
    let mut controller = Controller::boot(&mut board);

    while !board.quit_requested() {
        controller.poll(&mut board);
        board.service();
        thread::sleep(POLL_INTERVAL);
    }
}
