//! Character-cell text renderer for `embedded-graphics` targets.
//!
//! Emulates an 8 x 20 character LCD on a pixel display: each cell is a fixed
//! 16 x 30 px box and text is drawn with an opaque background, so writing a
//! row overwrites whatever was there before.
//! Generic over `DrawTarget<Color = Rgb565>`, so the firmware and the
//! simulator share one renderer.

use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};
use profont::PROFONT_24_POINT;

use crate::colors::{BLACK, GRAY, RED, WHITE};
use crate::config::{CELL_HEIGHT, CELL_WIDTH, PANEL_COLUMNS, PANEL_HEIGHT, PANEL_ROWS, PANEL_WIDTH};
use crate::leds::{LedBar, RUNGS};

/// Cell text: white on black, opaque.
const CELL_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyleBuilder::new()
    .font(&PROFONT_24_POINT)
    .text_color(WHITE)
    .background_color(BLACK)
    .build();

/// Top-left anchored text.
const CELL_TEXT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

const LOGO_TEXT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

const LOGO_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_24_POINT, WHITE);

/// Pixel position of a cell's top-left corner.
#[inline]
pub const fn cell_origin(
    row: u8,
    col: u8,
) -> Point {
    Point::new(col as i32 * CELL_WIDTH as i32, row as i32 * CELL_HEIGHT as i32)
}

/// Draw `text` from cell (`row`, `col`), clipped at the right edge of the panel.
///
/// Rows past the bottom are ignored.
pub fn draw_text<D>(
    display: &mut D,
    row: u8,
    col: u8,
    text: &str,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if row >= PANEL_ROWS || col >= PANEL_COLUMNS {
        return;
    }
    let room = usize::from(PANEL_COLUMNS - col);
    // Rows are ASCII; fall back to the whole text if a char boundary is hit
    let visible = text.get(..room.min(text.len())).unwrap_or(text);

    Text::with_text_style(visible, cell_origin(row, col), CELL_STYLE, CELL_TEXT)
        .draw(display)
        .ok();
}

/// Blank the text area.
pub fn clear<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(Point::zero(), Size::new(PANEL_WIDTH, PANEL_HEIGHT))
        .into_styled(PrimitiveStyle::with_fill(BLACK))
        .draw(display)
        .ok();
}

/// Splash screen shown at power-on.
pub fn draw_logo<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    clear(display);

    let center = Point::new(PANEL_WIDTH as i32 / 2, PANEL_HEIGHT as i32 / 2);
    Rectangle::with_center(center, Size::new(PANEL_WIDTH - 40, 3 * CELL_HEIGHT))
        .into_styled(PrimitiveStyle::with_stroke(RED, 3))
        .draw(display)
        .ok();
    Text::with_text_style("DriveSync", center, LOGO_STYLE, LOGO_TEXT)
        .draw(display)
        .ok();
}

/// Draw the LED ladder as a strip of squares starting at `origin`, bottom rung on the left.
pub fn draw_led_strip<D>(
    display: &mut D,
    origin: Point,
    leds: LedBar,
) where
    D: DrawTarget<Color = Rgb565>,
{
    const LED_SIZE: u32 = 24;
    const LED_GAP: i32 = 12;

    for k in 0..RUNGS {
        let color = if leds.is_lit(k) { RED } else { GRAY };
        let x = origin.x + k as i32 * (LED_SIZE as i32 + LED_GAP);
        Rectangle::new(Point::new(x, origin.y), Size::new(LED_SIZE, LED_SIZE))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(display)
            .ok();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
