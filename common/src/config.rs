//! Compile-time configuration for the simulator core.
//!
//! Timing gates, arming thresholds, LED ladder steps and the text panel
//! geometry. All durations are in milliseconds of the monotonic tick.

// =============================================================================
// Timing Gates
// =============================================================================

/// Control loop gate: trigger ramps, gear shifts, physics and telemetry.
///
/// Gates fire when strictly more than the period has elapsed, so with a
/// period of 1 the control loop runs at most every 2 ms.
pub const CONTROL_PERIOD_MS: u32 = 1;

/// Driving display refresh gate.
pub const DRIVE_DISPLAY_PERIOD_MS: u32 = 50;

/// Arming clock/status refresh gate.
pub const ARMING_STATUS_PERIOD_MS: u32 = 300;

/// "Engine Start" prompt blink toggle while the arm button is released.
pub const ARMING_BLINK_PERIOD_MS: u32 = 1500;

/// Diagnostic display refresh gate.
pub const DIAGNOSTIC_DISPLAY_PERIOD_MS: u32 = 300;

// =============================================================================
// Arming Sequence
// =============================================================================

/// Hold duration on the arm button that enters Driving.
pub const ARMING_HOLD_MS: u32 = 3500;

/// Milliseconds of hold per progress bar segment.
pub const ARMING_SEGMENT_MS: u32 = 230;

/// Number of segment-capable cells in the progress bar (cells 1..=14).
pub const ARMING_BAR_CELLS: usize = 14;

/// Segments per LED rung on the arming ladder.
pub const ARMING_SEGMENTS_PER_RUNG: u32 = 3;

/// The status refresh blanks the progress row while the hold is this short.
pub const ARMING_BAR_CLEAR_MS: u32 = 200;

/// Render pause after arming completes, before Driving starts polling.
pub const ARMING_SETTLE_MS: u32 = 600;

// =============================================================================
// Driving
// =============================================================================

/// RPM step between LED ladder rungs in Driving (1600/3200/4800/6400).
pub const RPM_PER_RUNG: i16 = 1600;

/// Millivolts per sensitivity step (tenths of the steering slope).
pub const SENSITIVITY_MV_PER_STEP: i32 = 30;

// =============================================================================
// Startup Sequence
// =============================================================================

/// Logo hold time before the LED animation.
pub const STARTUP_LOGO_MS: u32 = 500;

/// Step length of the LED chase and blink animations.
pub const STARTUP_STEP_MS: u32 = 100;

/// Number of LED blink steps after the chase.
pub const STARTUP_BLINK_STEPS: u8 = 7;

// =============================================================================
// Text Panel Geometry
// =============================================================================

/// Number of text rows on the panel. Screens use the even rows.
pub const PANEL_ROWS: u8 = 8;

/// Number of text columns on the panel.
pub const PANEL_COLUMNS: u8 = 20;

/// Width of a text cell in pixels.
pub const CELL_WIDTH: u32 = 16;

/// Height of a text cell in pixels.
pub const CELL_HEIGHT: u32 = 30;

/// Panel width in pixels (320 for the PIM715).
pub const PANEL_WIDTH: u32 = PANEL_COLUMNS as u32 * CELL_WIDTH;

/// Panel height in pixels (240 for the PIM715).
pub const PANEL_HEIGHT: u32 = PANEL_ROWS as u32 * CELL_HEIGHT;
