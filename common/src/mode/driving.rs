//! Normal driving mode.
//!
//! Three sub-loops share one pass, each behind its own gate:
//!
//! 1. **Control** (period 1, so every 2 ms): trigger ramps, paddle shifts,
//!    physics update, telemetry frame.
//! 2. **Page toggle** (every pass): any level change of the page button
//!    forces a redraw; the release flips between the drive and settings pages.
//! 3. **Display** (50 ms): redraw the active page.
//!
//! The steering angle and the RPM LED ladder are refreshed on every pass.
//! While the settings page is shown the arm button re-zeros steering on
//! release and the potentiometer retunes the sensitivity continuously.

use crate::board::{Board, Input, SimEvent};
use crate::config::{CONTROL_PERIOD_MS, DRIVE_DISPLAY_PERIOD_MS};
use crate::display::{self, SETTINGS_TITLE};
use crate::encoder::EncoderSnapshot;
use crate::gate::Gate;
use crate::input::{ControlInputs, DriveLevels, Edge, EdgeDetector, InputSampler};
use crate::leds::LedBar;
use crate::physics::VehicleState;
use crate::steering::Calibration;
use crate::telemetry::TelemetryFrame;

/// Page shown by the Driving display loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrivePage {
    /// Gear, clock, angle, RPM/speed, pedals.
    #[default]
    Drive,
    /// Sensitivity and raw encoder readings.
    Settings,
}

impl DrivePage {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Drive => Self::Settings,
            Self::Settings => Self::Drive,
        }
    }
}

/// Driving sub-loop state.
#[derive(Clone, Copy, Debug)]
pub struct Driving {
    calibration: Calibration,
    sampler: InputSampler,
    vehicle: VehicleState,
    page: DrivePage,
    steer_angle: i16,
    control_gate: Gate,
    display_gate: Gate,
    page_button: EdgeDetector,
    arm_button: EdgeDetector,
}

impl Driving {
    /// Enter Driving at tick `now`; the first pass runs control and redraws.
    pub fn new(
        calibration: Calibration,
        now: u32,
    ) -> Self {
        let mut control_gate = Gate::new(CONTROL_PERIOD_MS);
        let mut display_gate = Gate::new(DRIVE_DISPLAY_PERIOD_MS);
        control_gate.force(now);
        display_gate.force(now);

        Self {
            calibration,
            sampler: InputSampler::new(),
            vehicle: VehicleState::new(),
            page: DrivePage::Drive,
            steer_angle: 0,
            control_gate,
            display_gate,
            page_button: EdgeDetector::new(false),
            // Arming ends with the button held
            arm_button: EdgeDetector::new(true),
        }
    }

    #[inline]
    pub const fn calibration(&self) -> Calibration { self.calibration }

    #[inline]
    pub const fn vehicle(&self) -> &VehicleState { &self.vehicle }

    #[inline]
    pub const fn page(&self) -> DrivePage { self.page }

    /// Control signals as of the last pass.
    pub const fn controls(&self) -> ControlInputs {
        ControlInputs {
            throttle: self.sampler.throttle(),
            brake: self.sampler.brake(),
            gear: self.sampler.gear(),
            steer_angle_tenth_deg: self.steer_angle,
        }
    }

    /// One superloop pass.
    pub fn poll<B: Board>(
        &mut self,
        board: &mut B,
    ) {
        let now = board.now_ms();
        let encoder = board.encoder();

        self.steer_angle = self.calibration.steer_angle(encoder.value);
        board.set_leds(LedBar::rpm_ladder(self.vehicle.rpm()));

        if self.page == DrivePage::Settings {
            if self.arm_button.update(board.is_active(Input::Arm)) == Some(Edge::Released) {
                self.calibration.capture_zero(encoder.value);
                board.notify(SimEvent::ZeroCaptured { offset: encoder.value });
            }
            self.calibration.retune(board.read_millivolts());
        }

        if self.control_gate.ready(now) {
            self.control_tick(board);
        }

        if let Some(edge) = self.page_button.update(board.is_active(Input::PageToggle)) {
            self.display_gate.force(now);
            if edge == Edge::Released {
                self.page = self.page.toggled();
                board.notify(SimEvent::DrivePageChanged(self.page));
            }
        }

        if self.display_gate.ready(now) {
            self.draw(board, encoder);
        }
    }

    fn control_tick<B: Board>(
        &mut self,
        board: &mut B,
    ) {
        let levels = DriveLevels {
            throttle_trigger: board.is_active(Input::ThrottleTrigger),
            brake_trigger: board.is_active(Input::BrakeTrigger),
            gear_down: board.is_active(Input::GearDown),
            gear_up: board.is_active(Input::GearUp),
        };
        if let Some(gear) = self.sampler.sample(levels) {
            board.notify(SimEvent::GearChanged { gear });
        }

        let controls = self.controls();
        self.vehicle.update(controls.throttle, controls.brake, controls.gear);

        // RPM and speed are never negative, so the casts are lossless
        let frame = TelemetryFrame {
            gear: controls.gear,
            rpm: self.vehicle.rpm() as u16,
            speed_kmh: self.vehicle.kmh() as u16,
            throttle: controls.throttle,
            brake: controls.brake,
            steer_angle: controls.steer_angle_tenth_deg,
        };
        for byte in frame.encode() {
            board.transmit(byte);
        }
    }

    fn draw<B: Board>(
        &self,
        board: &mut B,
        encoder: EncoderSnapshot,
    ) {
        let controls = self.controls();
        match self.page {
            DrivePage::Drive => {
                let time = board.wall_clock();
                board.draw_text(0, 0, &display::gear_clock(controls.gear, time));
                board.draw_text(2, 0, &display::steer_angle(controls.steer_angle_tenth_deg));
                board.draw_text(4, 0, &display::rpm_speed(self.vehicle.rpm(), self.vehicle.kmh()));
                board.draw_text(6, 0, &display::pedals(controls.brake, controls.throttle));
            }
            DrivePage::Settings => {
                board.draw_text(0, 0, SETTINGS_TITLE);
                board.draw_text(2, 0, &display::sensitivity(self.calibration.sensitivity));
                board.draw_text(4, 0, &display::encoder_value(encoder.value));
                board.draw_text(6, 0, &display::encoder_offset(self.calibration.zero_offset));
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBoard;

    const CALIBRATION: Calibration = Calibration {
        zero_offset: 100,
        sensitivity: 0,
        baseline_mv: 1650,
    };

    fn started() -> (MockBoard, Driving) {
        let mut board = MockBoard::new();
        board.now = 5000;
        board.millivolts = 1650;
        board.encoder.value = 100;
        board.press(Input::Arm);
        (board, Driving::new(CALIBRATION, 5000))
    }

    fn run(
        board: &mut MockBoard,
        driving: &mut Driving,
        ms: u32,
    ) {
        for _ in 0..ms {
            driving.poll(board);
            board.advance(1);
        }
    }

    /// Press then release the page button across two passes.
    fn flip_page(
        board: &mut MockBoard,
        driving: &mut Driving,
    ) {
        board.press(Input::PageToggle);
        run(board, driving, 1);
        board.release(Input::PageToggle);
        run(board, driving, 1);
    }

    #[test]
    fn test_first_pass_transmits_and_draws() {
        let (mut board, mut driving) = started();
        driving.poll(&mut board);
        assert_eq!(board.transmitted.len(), 16);
        assert_eq!(board.row(0).trim_end(), "Gear 0  00:00:05");
        assert_eq!(board.row(4).trim_end(), "   0 RPM   0 Kmh");
    }

    #[test]
    fn test_control_loop_runs_every_other_ms() {
        let (mut board, mut driving) = started();
        run(&mut board, &mut driving, 100);
        // Forced first tick, then every 2 ms
        assert_eq!(board.frames().len(), 50);
    }

    #[test]
    fn test_throttle_ramps_per_control_tick() {
        let (mut board, mut driving) = started();
        board.press(Input::ThrottleTrigger);
        run(&mut board, &mut driving, 20);
        assert_eq!(driving.controls().throttle, 10);
        let frames = board.frames();
        assert_eq!(frames.last().map(|f| f.throttle), Some(10));
    }

    #[test]
    fn test_paddles_shift_once_per_press() {
        let (mut board, mut driving) = started();
        board.press(Input::GearUp);
        run(&mut board, &mut driving, 50);
        assert_eq!(driving.controls().gear, 1);
        board.release(Input::GearUp);
        run(&mut board, &mut driving, 4);
        board.press(Input::GearUp);
        run(&mut board, &mut driving, 4);
        assert_eq!(driving.controls().gear, 2);
        board.release(Input::GearUp);
        board.press(Input::GearDown);
        run(&mut board, &mut driving, 4);
        assert_eq!(driving.controls().gear, 1);

        let shifts: Vec<_> = board
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::GearChanged { .. }))
            .collect();
        assert_eq!(shifts.len(), 3);
    }

    #[test]
    fn test_steering_follows_encoder() {
        let (mut board, mut driving) = started();
        board.encoder.value = 94;
        run(&mut board, &mut driving, 1);
        assert_eq!(driving.controls().steer_angle_tenth_deg, -30);
        assert_eq!(board.frames()[0].steer_angle, -30);
        assert_eq!(board.row(2).trim_end(), "  Deg   -3.0");
    }

    #[test]
    fn test_page_flips_on_release() {
        let (mut board, mut driving) = started();
        board.press(Input::PageToggle);
        run(&mut board, &mut driving, 10);
        assert_eq!(driving.page(), DrivePage::Drive);
        board.release(Input::PageToggle);
        run(&mut board, &mut driving, 1);
        assert_eq!(driving.page(), DrivePage::Settings);
        assert_eq!(board.row(0).trim_end(), SETTINGS_TITLE.trim_end());
        assert_eq!(board.events, vec![SimEvent::DrivePageChanged(DrivePage::Settings)]);
    }

    #[test]
    fn test_page_press_forces_redraw() {
        let (mut board, mut driving) = started();
        run(&mut board, &mut driving, 1);
        let draws = board.draws;
        run(&mut board, &mut driving, 10);
        assert_eq!(board.draws, draws);

        board.press(Input::PageToggle);
        run(&mut board, &mut driving, 1);
        assert_eq!(board.draws, draws + 4);
    }

    #[test]
    fn test_arm_ignored_on_drive_page() {
        let (mut board, mut driving) = started();
        run(&mut board, &mut driving, 5);
        board.encoder.value = 300;
        board.release(Input::Arm);
        run(&mut board, &mut driving, 5);
        assert_eq!(driving.calibration().zero_offset, 100);
    }

    #[test]
    fn test_settings_page_rezero_on_arm_release() {
        let (mut board, mut driving) = started();
        flip_page(&mut board, &mut driving);
        board.encoder.value = 300;
        run(&mut board, &mut driving, 5);
        assert_eq!(driving.calibration().zero_offset, 100);

        board.release(Input::Arm);
        run(&mut board, &mut driving, 1);
        assert_eq!(driving.calibration().zero_offset, 300);
        assert!(board.events.contains(&SimEvent::ZeroCaptured { offset: 300 }));
        // The angle picks up the new zero on the next pass
        run(&mut board, &mut driving, 1);
        assert_eq!(driving.controls().steer_angle_tenth_deg, 0);
    }

    #[test]
    fn test_settings_page_retunes_sensitivity() {
        let (mut board, mut driving) = started();
        board.millivolts = 1950;
        run(&mut board, &mut driving, 5);
        assert_eq!(driving.calibration().sensitivity, 0);

        flip_page(&mut board, &mut driving);
        run(&mut board, &mut driving, 1);
        assert_eq!(driving.calibration().sensitivity, 10);
        run(&mut board, &mut driving, 60);
        assert_eq!(board.row(2).trim_end(), "Sensitive:  +1.0");

        // Leaving the page keeps the last value
        flip_page(&mut board, &mut driving);
        board.millivolts = 1650;
        run(&mut board, &mut driving, 5);
        assert_eq!(driving.calibration().sensitivity, 10);
    }

    #[test]
    fn test_rpm_ladder_tracks_vehicle() {
        let (mut board, mut driving) = started();
        board.press(Input::GearUp);
        board.press(Input::ThrottleTrigger);
        run(&mut board, &mut driving, 600);
        let rpm = driving.vehicle().rpm();
        assert!(rpm > 1600, "rpm {rpm}");
        run(&mut board, &mut driving, 1);
        assert_eq!(board.leds, LedBar::rpm_ladder(driving.vehicle().rpm()));
    }
}
