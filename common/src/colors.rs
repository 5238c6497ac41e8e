//! Color constants for the text panel and LED strip.
//!
//! Rgb565 packs 5 bits red, 6 bits green and 5 bits blue, the native format
//! of the ST7789 so no conversion happens on the way to the display.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

/// Panel background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Panel text.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Lit LED rung and logo accent.
pub const RED: Rgb565 = Rgb565::RED;

/// Unlit LED rung.
/// RGB565: (8, 16, 8), roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);
