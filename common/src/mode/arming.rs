//! Hold-to-arm screen.
//!
//! Holding the arm button fills a progress bar and the LED ladder; after
//! 3500 ms of continuous hold the steering zero and the potentiometer
//! baseline are captured and Driving takes over. Letting go restarts the
//! hold and blinks the "Engine Start" prompt.

use crate::board::{Board, Input};
use crate::config::{
    ARMING_BAR_CLEAR_MS,
    ARMING_BLINK_PERIOD_MS,
    ARMING_HOLD_MS,
    ARMING_SETTLE_MS,
    ARMING_STATUS_PERIOD_MS,
};
use crate::display::{self, ARMING_TITLE, BLANK_WIDE};
use crate::gate::Gate;
use crate::leds::LedBar;
use crate::steering::Calibration;

/// Arming sub-loop state.
#[derive(Clone, Copy, Debug)]
pub struct Arming {
    first_pass: bool,
    status_gate: Gate,
    blink_gate: Gate,
    press_start: u32,
    prompt_visible: bool,
}

impl Arming {
    pub const fn new() -> Self {
        Self {
            first_pass: true,
            status_gate: Gate::new(ARMING_STATUS_PERIOD_MS),
            blink_gate: Gate::new(ARMING_BLINK_PERIOD_MS),
            press_start: 0,
            prompt_visible: false,
        }
    }

    /// Milliseconds the arm button has been held as of `now`.
    #[inline]
    pub const fn held_ms(
        &self,
        now: u32,
    ) -> u32 {
        now.wrapping_sub(self.press_start)
    }

    /// Whether the "Engine Start" prompt is in its visible phase.
    #[inline]
    pub const fn prompt_visible(&self) -> bool { self.prompt_visible }

    /// One pass. Returns the session calibration once the hold completes.
    pub fn poll<B: Board>(
        &mut self,
        board: &mut B,
    ) -> Option<Calibration> {
        let now = board.now_ms();

        if self.first_pass {
            self.first_pass = false;
            self.status_gate.force(now);
            self.blink_gate.force(now);
            self.press_start = now;
            return None;
        }

        if self.status_gate.ready(now) {
            self.draw_status(board, now);
        }

        if !board.is_active(Input::Arm) {
            self.press_start = now;
            if self.blink_gate.ready(now) {
                self.prompt_visible = !self.prompt_visible;
            }
            return None;
        }

        self.prompt_visible = true;
        let held = self.held_ms(now);
        board.draw_text(4, 0, &display::progress_bar(held));
        board.set_leds(LedBar::arming_ladder(held));

        if held < ARMING_HOLD_MS {
            return None;
        }

        let calibration = Calibration {
            zero_offset: board.encoder().value,
            sensitivity: 0,
            baseline_mv: board.read_millivolts(),
        };
        board.clear_display();
        board.delay_ms(ARMING_SETTLE_MS);
        Some(calibration)
    }

    fn draw_status<B: Board>(
        &self,
        board: &mut B,
        now: u32,
    ) {
        board.draw_text(0, 0, ARMING_TITLE);
        let time = board.wall_clock();
        board.draw_text(2, 0, &display::arming_clock(time));
        if self.held_ms(now) <= ARMING_BAR_CLEAR_MS {
            board.draw_text(4, 0, BLANK_WIDE);
        }
        board.draw_text(6, 0, display::engine_start(self.prompt_visible));
    }
}

impl Default for Arming {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
