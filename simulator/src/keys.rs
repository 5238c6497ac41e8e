//! Keyboard bindings for the bench.
//!
//! Hold keys stand in for the wheel's buttons, triggers and paddles; the
//! arrow keys turn the encoder and the potentiometer.

use drivesync_common::board::Input;
use embedded_graphics_simulator::sdl2::Keycode;

/// Encoder counts per Left/Right key event (key repeat keeps turning).
pub const STEER_COUNTS_PER_KEY: u16 = 4;

/// Potentiometer change per Up/Down key event.
pub const POT_MV_PER_KEY: i32 = 30;

/// Potentiometer range, matching the 3.3 V ADC reference.
pub const POT_MAX_MV: i32 = 3300;

/// What a key does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Level input, active while the key is down.
    Hold(Input),
    /// Turn the encoder; `true` is clockwise (count up).
    Steer { clockwise: bool },
    /// Turn the potentiometer by this many millivolts.
    Pot(i32),
}

/// Key binding lookup.
pub fn action_for(keycode: Keycode) -> Option<KeyAction> {
    let action = match keycode {
        Keycode::A => KeyAction::Hold(Input::Arm),
        Keycode::B => KeyAction::Hold(Input::PageToggle),
        Keycode::Z => KeyAction::Hold(Input::BrakeTrigger),
        Keycode::X => KeyAction::Hold(Input::ThrottleTrigger),
        Keycode::Q => KeyAction::Hold(Input::GearDown),
        Keycode::E => KeyAction::Hold(Input::GearUp),
        Keycode::Left => KeyAction::Steer { clockwise: false },
        Keycode::Right => KeyAction::Steer { clockwise: true },
        Keycode::Up => KeyAction::Pot(POT_MV_PER_KEY),
        Keycode::Down => KeyAction::Pot(-POT_MV_PER_KEY),
        _ => return None,
    };
    Some(action)
}

/// Apply a potentiometer step, clamped to the ADC range.
pub fn turn_pot(
    millivolts: u16,
    delta: i32,
) -> u16 {
    (i32::from(millivolts) + delta).clamp(0, POT_MAX_MV) as u16
}

/// Printed once at startup.
pub const HELP: &str = "\
DriveSync bench controls
  A (hold 3.5 s)   arm / release on settings page to re-zero
  B                toggle page
  Z / X            brake / throttle trigger
  Q / E            gear down / gear up paddle
  Left / Right     turn the wheel
  Up / Down        sensitivity potentiometer (+/- 30 mV)
Run with --developer to hold A through startup (diagnostic mode).";

// =============================================================================
// Unit Tests
// =============================================================================
