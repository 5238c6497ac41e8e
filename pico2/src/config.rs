//! Board configuration for the Pico 2 wheel.
//!
//! # Pin Map
//!
//! | Function | GPIO | Electrical |
//! |----------|------|------------|
//! | Telemetry UART0 TX | 0 | 115200 8N1 |
//! | LED ladder rungs 0..=3 | 2, 3, 4, 5 | active-high |
//! | Left trigger (brake) | 6 | active-high, pull-down |
//! | Right trigger (throttle) | 7 | active-high, pull-down |
//! | Left paddle (gear down) | 8 | active-high, pull-down |
//! | Right paddle (gear up) | 9 | active-high, pull-down |
//! | Encoder A / B | 10 / 11 | pull-up |
//! | Arm button (pack button A) | 12 | active-low, pull-up |
//! | Page button (pack button B) | 13 | active-low, pull-up |
//! | Display DC / CS / CLK / MOSI | 16 / 17 / 18 / 19 | SPI0 |
//! | Display backlight | 20 | high = on |
//! | Encoder index | 22 | pull-up |
//! | Sensitivity pot | 26 (ADC0) | 0..3.3 V |
//!
//! GPIO 26 is shared with the red channel of the PIM715 RGB LED; the firmware
//! never drives it, so the pot reading sees only the LED's leakage.

// =============================================================================
// Digital Inputs
// =============================================================================

/// Electrical level that means "pressed".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// Pressed pulls the pin low (buttons with pull-up).
    ActiveLow,
    /// Pressed drives the pin high (triggers and paddles with pull-down).
    ActiveHigh,
}

impl Polarity {
    /// Logical "pressed" state for a raw pin level.
    #[inline]
    pub const fn is_active(
        self,
        pin_high: bool,
    ) -> bool {
        match self {
            Self::ActiveLow => !pin_high,
            Self::ActiveHigh => pin_high,
        }
    }
}

/// Arm and page buttons on the display pack.
pub const BUTTON_POLARITY: Polarity = Polarity::ActiveLow;

/// Triggers and paddles.
pub const SWITCH_POLARITY: Polarity = Polarity::ActiveHigh;

// =============================================================================
// Analog Input
// =============================================================================

/// ADC full-scale reference in millivolts.
pub const ADC_REFERENCE_MV: u32 = 3300;

/// Largest 12-bit ADC code.
pub const ADC_MAX_CODE: u32 = 4095;

/// Convert a raw 12-bit ADC code to millivolts.
///
/// Codes above 12 bits (never produced by the RP2350 ADC) saturate at full scale.
pub const fn millivolts_from_raw(raw: u16) -> u16 {
    let code = if raw as u32 > ADC_MAX_CODE { ADC_MAX_CODE } else { raw as u32 };
    (code * ADC_REFERENCE_MV / ADC_MAX_CODE) as u16
}

// =============================================================================
// Peripherals
// =============================================================================

/// Telemetry link baud rate.
pub const UART_BAUD: u32 = 115_200;

/// Display SPI clock. The ST7789 supports up to 62.5 MHz.
pub const DISPLAY_SPI_HZ: u32 = 62_500_000;

/// Native (portrait) panel size, before the 90 degree rotation.
pub const DISPLAY_NATIVE_SIZE: (u16, u16) = (240, 320);

/// mipidsi SPI interface staging buffer.
pub const DISPLAY_BUFFER_LEN: usize = 512;

// =============================================================================
// Unit Tests
// =============================================================================
