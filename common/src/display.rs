//! Fixed-width text rows for every screen.
//!
//! Screens are four rows of (at most) 16 characters drawn on the even panel
//! rows 0, 2, 4 and 6. Every formatter returns a stack-allocated
//! [`heapless::String`]; nothing allocates.
//!
//! # Tenths
//!
//! Angles and the sensitivity are stored in tenths and shown as `±W.F`, with
//! the sign field right-aligned to three characters (`" +0.5"`, `"-12.3"`).
//! The sign is taken from the whole value, so -5 renders as `-0.5`.

use core::fmt::Write;

use heapless::String;

use crate::clock::WallTime;
use crate::config::{ARMING_BAR_CELLS, ARMING_SEGMENT_MS, PANEL_COLUMNS};

/// One formatted panel row.
pub type Row = String<{ PANEL_COLUMNS as usize }>;

// =============================================================================
// Static Texts
// =============================================================================

/// Arming screen title.
pub const ARMING_TITLE: &str = "   DriveSync    ";

/// Blinking arming prompt.
pub const ENGINE_START: &str = "  Engine Start  ";

/// Settings page title.
pub const SETTINGS_TITLE: &str = "  Setting Mode  ";

/// Diagnostic screen title.
pub const DIAGNOSTIC_TITLE: &str = " Developer_Mode ";

/// Blank 16-character row.
pub const BLANK: &str = "                ";

/// Blank full-width row.
pub const BLANK_WIDE: &str = "                    ";

// =============================================================================
// Helpers
// =============================================================================

fn row(args: core::fmt::Arguments<'_>) -> Row {
    let mut s = Row::new();
    // Formats are sized to the panel width
    let _ = s.write_fmt(args);
    s
}

/// `±W.F` with a three-wide sign field.
///
/// The sign comes from the whole value rather than the truncated integer
/// part, so -0.9..=-0.1 print negative instead of as `+0.x`.
fn write_tenths(
    s: &mut Row,
    tenths: i16,
) {
    let value = i32::from(tenths);
    let sign = if value < 0 { '-' } else { '+' };
    let mut head: String<8> = String::new();
    let _ = write!(head, "{sign}{}", value.abs() / 10);
    let _ = write!(s, "{:>3}.{}", head.as_str(), value.abs() % 10);
}

fn level(active: bool) -> &'static str { if active { "Hi" } else { "Lo" } }

// =============================================================================
// Arming Screen
// =============================================================================

/// `"   HH:MM:SS   "`
pub fn arming_clock(time: WallTime) -> Row {
    row(format_args!("   {:02}:{:02}:{:02}   ", time.hours, time.minutes, time.seconds))
}

/// Progress bar: blank cell, 14 segment cells, blank cell.
///
/// Segment `i` (1-based) is drawn once more than `i` segments of 230 ms have
/// elapsed.
pub fn progress_bar(held_ms: u32) -> Row {
    let filled = held_ms / ARMING_SEGMENT_MS;
    let mut s = Row::new();
    let _ = s.push(' ');
    for i in 1..=ARMING_BAR_CELLS as u32 {
        let _ = s.push(if i < filled { '-' } else { ' ' });
    }
    let _ = s.push(' ');
    s
}

/// The "Engine Start" prompt or its blank, depending on the blink phase.
pub const fn engine_start(visible: bool) -> &'static str { if visible { ENGINE_START } else { BLANK } }

// =============================================================================
// Driving: Drive Page
// =============================================================================

/// `"Gear G  HH:MM:SS"`
pub fn gear_clock(
    gear: u8,
    time: WallTime,
) -> Row {
    row(format_args!(
        "Gear {gear:1}  {:02}:{:02}:{:02}",
        time.hours, time.minutes, time.seconds
    ))
}

/// `"  Deg  ±W.F    "`
pub fn steer_angle(tenths: i16) -> Row {
    let mut s = row(format_args!("  Deg  "));
    write_tenths(&mut s, tenths);
    let _ = s.push_str("    ");
    s
}

/// `"RRRR RPM SSS Kmh"`
pub fn rpm_speed(
    rpm: i16,
    kmh: i16,
) -> Row {
    row(format_args!("{rpm:4} RPM {kmh:3} Kmh"))
}

/// `"Brk BBB  Thr TTT"`
pub fn pedals(
    brake: u8,
    throttle: u8,
) -> Row {
    row(format_args!("Brk {brake:03}  Thr {throttle:03}"))
}

// =============================================================================
// Driving: Settings Page / Diagnostic
// =============================================================================

/// `"Sensitive: ±W.F "`
pub fn sensitivity(tenths: i16) -> Row {
    let mut s = row(format_args!("Sensitive: "));
    write_tenths(&mut s, tenths);
    let _ = s.push(' ');
    s
}

/// `"ENC Value: VVVVV"`
pub fn encoder_value(value: i16) -> Row { row(format_args!("ENC Value: {value:5}")) }

/// `"ENC Offset:OOOOO"`
pub fn encoder_offset(offset: i16) -> Row { row(format_args!("ENC Offset:{offset:5}")) }

/// `" Time: HH:MM:SS "`
pub fn diagnostic_clock(time: WallTime) -> Row {
    row(format_args!(" Time: {:02}:{:02}:{:02} ", time.hours, time.minutes, time.seconds))
}

/// `" LT: Hi  RT: Lo "`
pub fn triggers(
    left: bool,
    right: bool,
) -> Row {
    row(format_args!(" LT:{:>3}  RT:{:>3} ", level(left), level(right)))
}

/// `" LB: Lo  RB: Hi "`
pub fn paddles(
    left: bool,
    right: bool,
) -> Row {
    row(format_args!(" LB:{:>3}  RB:{:>3} ", level(left), level(right)))
}

/// `"  VR1: MMMM mV "`
pub fn millivolts(mv: u16) -> Row { row(format_args!("  VR1: {mv:4} mV ")) }

// =============================================================================
// Unit Tests
// =============================================================================
