//! Hardware collaborator seam.
//!
//! The state machine never touches peripherals directly. Each platform (the
//! Pico 2 firmware, the desktop simulator, the unit-test mock) implements
//! [`Board`] and hands it to [`Controller`](crate::mode::Controller).

use crate::clock::{DateTime, WallTime};
use crate::encoder::EncoderSnapshot;
use crate::leds::LedBar;
use crate::mode::{DiagnosticPage, DrivePage, ModeKind};

/// Digital inputs read by the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
    /// Hold-to-arm button; also re-zeros steering on release.
    Arm,
    /// Page toggle button.
    PageToggle,
    /// Left trigger.
    BrakeTrigger,
    /// Right trigger.
    ThrottleTrigger,
    /// Left paddle.
    GearDown,
    /// Right paddle.
    GearUp,
}

impl Input {
    /// Every input, in wiring order.
    pub const ALL: [Self; 6] = [
        Self::Arm,
        Self::PageToggle,
        Self::BrakeTrigger,
        Self::ThrottleTrigger,
        Self::GearDown,
        Self::GearUp,
    ];
}

/// Notable state machine events, for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SimEvent {
    /// Startup finished and the first mode was selected.
    Booted { mode: ModeKind },
    /// Arm button held long enough; Driving begins.
    Armed { zero_offset: i16, baseline_mv: u16 },
    /// Driving page flipped.
    DrivePageChanged(DrivePage),
    /// Diagnostic page flipped.
    DiagnosticPageChanged(DiagnosticPage),
    /// A paddle changed gear.
    GearChanged { gear: u8 },
    /// Steering re-zeroed at the given encoder value.
    ZeroCaptured { offset: i16 },
}

/// Platform services consumed by the state machine.
///
/// Methods are infallible: peripheral write errors are ignored, and init
/// failures are handled before a board exists.
pub trait Board {
    /// Logical level of a digital input; `true` means pressed/pulled.
    fn is_active(
        &mut self,
        input: Input,
    ) -> bool;

    /// Sensitivity potentiometer in millivolts.
    fn read_millivolts(&mut self) -> u16;

    /// Consistent snapshot of the encoder counters.
    fn encoder(&mut self) -> EncoderSnapshot;

    /// Current time of day.
    fn wall_clock(&mut self) -> WallTime;

    /// Overwrite the wall clock.
    fn set_wall_clock(
        &mut self,
        datetime: DateTime,
    );

    /// Send one byte on the telemetry link.
    fn transmit(
        &mut self,
        byte: u8,
    );

    /// Draw `text` starting at a text cell.
    fn draw_text(
        &mut self,
        row: u8,
        col: u8,
        text: &str,
    );

    /// Blank the whole panel.
    fn clear_display(&mut self);

    /// Show the startup logo.
    fn draw_logo(&mut self) {}

    /// Drive the LED ladder.
    fn set_leds(
        &mut self,
        leds: LedBar,
    );

    /// Monotonic millisecond tick; wraps.
    fn now_ms(&mut self) -> u32;

    /// Busy-wait; nothing else runs on the superloop meanwhile.
    fn delay_ms(
        &mut self,
        ms: u32,
    );

    /// Observe a state machine event.
    fn notify(
        &mut self,
        _event: SimEvent,
    ) {
    }
}
