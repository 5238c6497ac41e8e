//! Power-on sequence.
//!
//! Logo, LED chase, LED blink, then the wall clock is reset and the first
//! mode is chosen from the arm button: held through the animation means
//! Diagnostic, released means Arming. Everything here busy-waits.

use crate::board::{Board, Input};
use crate::clock::DateTime;
use crate::config::{STARTUP_BLINK_STEPS, STARTUP_LOGO_MS, STARTUP_STEP_MS};
use crate::leds::{LedBar, RUNGS};
use crate::mode::ModeKind;

/// Play the startup animation and pick the first mode.
pub fn run<B: Board>(board: &mut B) -> ModeKind {
    board.draw_logo();
    board.delay_ms(STARTUP_LOGO_MS);

    for step in 0..RUNGS as u8 {
        board.set_leds(LedBar::chase(step));
        board.delay_ms(STARTUP_STEP_MS);
    }
    for step in 0..STARTUP_BLINK_STEPS {
        board.set_leds(LedBar::blink(step));
        board.delay_ms(STARTUP_STEP_MS);
    }

    board.clear_display();
    board.set_wall_clock(DateTime::ZERO);

    if board.is_active(Input::Arm) { ModeKind::Diagnostic } else { ModeKind::Arming }
}

// =============================================================================
// Unit Tests
// =============================================================================
