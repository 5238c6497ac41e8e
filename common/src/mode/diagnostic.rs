//! Developer diagnostic screen.
//!
//! Entered instead of Arming when the arm button is held through startup.
//! Shows live input levels on one page and encoder/potentiometer readings on
//! the other, redrawn every 300 ms. No telemetry is sent.

use crate::board::{Board, Input, SimEvent};
use crate::config::DIAGNOSTIC_DISPLAY_PERIOD_MS;
use crate::display::{self, DIAGNOSTIC_TITLE};
use crate::encoder::EncoderSnapshot;
use crate::gate::Gate;
use crate::input::{Edge, EdgeDetector};

/// Page shown by the diagnostic display loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiagnosticPage {
    /// Clock, trigger and paddle levels.
    #[default]
    Inputs,
    /// Encoder value/offset and potentiometer voltage.
    Encoder,
}

impl DiagnosticPage {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Inputs => Self::Encoder,
            Self::Encoder => Self::Inputs,
        }
    }
}

/// Diagnostic sub-loop state.
#[derive(Clone, Copy, Debug)]
pub struct Diagnostic {
    first_pass: bool,
    display_gate: Gate,
    page: DiagnosticPage,
    zero_offset: i16,
    page_button: EdgeDetector,
    arm_button: EdgeDetector,
}

impl Diagnostic {
    pub const fn new() -> Self {
        Self {
            first_pass: true,
            display_gate: Gate::new(DIAGNOSTIC_DISPLAY_PERIOD_MS),
            page: DiagnosticPage::Inputs,
            zero_offset: 0,
            page_button: EdgeDetector::new(false),
            arm_button: EdgeDetector::new(true),
        }
    }

    #[inline]
    pub const fn page(&self) -> DiagnosticPage { self.page }

    /// Encoder value captured by the last arm release.
    #[inline]
    pub const fn zero_offset(&self) -> i16 { self.zero_offset }

    /// One superloop pass.
    pub fn poll<B: Board>(
        &mut self,
        board: &mut B,
    ) {
        let now = board.now_ms();
        let encoder = board.encoder();

        if self.arm_button.update(board.is_active(Input::Arm)) == Some(Edge::Released) {
            self.zero_offset = encoder.value;
            board.notify(SimEvent::ZeroCaptured { offset: encoder.value });
        }

        if self.first_pass {
            self.first_pass = false;
            self.display_gate.force(now);
            return;
        }

        if self.page_button.update(board.is_active(Input::PageToggle)) == Some(Edge::Released) {
            self.page = self.page.toggled();
            board.notify(SimEvent::DiagnosticPageChanged(self.page));
        }

        if self.display_gate.ready(now) {
            self.draw(board, encoder);
        }
    }

    fn draw<B: Board>(
        &self,
        board: &mut B,
        encoder: EncoderSnapshot,
    ) {
        board.draw_text(0, 0, DIAGNOSTIC_TITLE);
        match self.page {
            DiagnosticPage::Inputs => {
                let time = board.wall_clock();
                let triggers = display::triggers(
                    board.is_active(Input::BrakeTrigger),
                    board.is_active(Input::ThrottleTrigger),
                );
                let paddles = display::paddles(board.is_active(Input::GearDown), board.is_active(Input::GearUp));

                board.draw_text(2, 0, &display::diagnostic_clock(time));
                board.draw_text(4, 0, &triggers);
                board.draw_text(6, 0, &paddles);
            }
            DiagnosticPage::Encoder => {
                let millivolts = board.read_millivolts();

                board.draw_text(2, 0, &display::encoder_value(encoder.value));
                board.draw_text(4, 0, &display::encoder_offset(self.zero_offset));
                board.draw_text(6, 0, &display::millivolts(millivolts));
            }
        }
    }
}

impl Default for Diagnostic {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBoard;

    fn entered() -> (MockBoard, Diagnostic) {
        let mut board = MockBoard::new();
        board.now = 2000;
        board.press(Input::Arm);
        let mut diagnostic = Diagnostic::new();
        diagnostic.poll(&mut board);
        (board, diagnostic)
    }

    fn run(
        board: &mut MockBoard,
        diagnostic: &mut Diagnostic,
        ms: u32,
    ) {
        for _ in 0..ms {
            board.advance(1);
            diagnostic.poll(board);
        }
    }

    #[test]
    fn test_inputs_page() {
        let (mut board, mut diagnostic) = entered();
        board.press(Input::BrakeTrigger);
        board.press(Input::GearUp);
        run(&mut board, &mut diagnostic, 1);

        assert_eq!(board.row(0).trim_end(), DIAGNOSTIC_TITLE.trim_end());
        assert_eq!(board.row(2).trim_end(), " Time: 00:00:02");
        assert_eq!(board.row(4).trim_end(), " LT: Hi  RT: Lo");
        assert_eq!(board.row(6).trim_end(), " LB: Lo  RB: Hi");
    }

    #[test]
    fn test_refresh_every_300_ms() {
        let (mut board, mut diagnostic) = entered();
        run(&mut board, &mut diagnostic, 1);
        assert_eq!(board.draws, 4);
        run(&mut board, &mut diagnostic, 300);
        assert_eq!(board.draws, 4);
        run(&mut board, &mut diagnostic, 1);
        assert_eq!(board.draws, 8);
    }

    #[test]
    fn test_page_flips_on_release_and_waits_for_refresh() {
        let (mut board, mut diagnostic) = entered();
        board.encoder.value = 321;
        board.millivolts = 987;
        run(&mut board, &mut diagnostic, 1);

        board.press(Input::PageToggle);
        run(&mut board, &mut diagnostic, 5);
        assert_eq!(diagnostic.page(), DiagnosticPage::Inputs);
        board.release(Input::PageToggle);
        run(&mut board, &mut diagnostic, 1);
        assert_eq!(diagnostic.page(), DiagnosticPage::Encoder);
        // No forced redraw: the page appears at the next refresh
        assert_eq!(board.row(2).trim_end(), " Time: 00:00:02");

        run(&mut board, &mut diagnostic, 300);
        assert_eq!(board.row(2).trim_end(), "ENC Value:   321");
        assert_eq!(board.row(4).trim_end(), "ENC Offset:    0");
        assert_eq!(board.row(6).trim_end(), "  VR1:  987 mV");
    }

    #[test]
    fn test_arm_release_captures_zero() {
        let (mut board, mut diagnostic) = entered();
        board.encoder.value = -77;
        run(&mut board, &mut diagnostic, 10);
        assert_eq!(diagnostic.zero_offset(), 0);

        board.release(Input::Arm);
        run(&mut board, &mut diagnostic, 1);
        assert_eq!(diagnostic.zero_offset(), -77);
        assert_eq!(board.events, vec![SimEvent::ZeroCaptured { offset: -77 }]);
    }

    #[test]
    fn test_never_transmits() {
        let (mut board, mut diagnostic) = entered();
        board.press(Input::ThrottleTrigger);
        run(&mut board, &mut diagnostic, 1000);
        assert!(board.transmitted.is_empty());
    }
}
