use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color as TermColor, Colors, Print, ResetColor, SetColors};

use crate::color::Color;
use crate::render::Pixmap;

/// Write a pixmap into a terminal region starting at `(column, row)`.
///
/// Each `▀` cell holds two vertically stacked pixels: the upper one in the
/// foreground color, the lower one in the background color. Transparent
/// pixels are composited over `backdrop` first, since terminal cells have no
/// alpha.
pub fn present<W: Write>(
    out: &mut W,
    pixmap: &Pixmap,
    column: u16,
    row: u16,
    backdrop: Color,
) -> io::Result<()> {
    let rows = pixmap.height().div_ceil(2);
    for cell_row in 0..rows {
        queue!(out, MoveTo(column, row + cell_row as u16))?;
        for x in 0..pixmap.width() {
            let top = composite(pixmap.pixel(x, cell_row * 2), backdrop);
            let bottom = composite(pixmap.pixel(x, cell_row * 2 + 1), backdrop);
            queue!(out, SetColors(Colors::new(to_term(top), to_term(bottom))), Print('▀'))?;
        }
    }
    queue!(out, ResetColor)?;
    Ok(())
}

/// Flatten a translucent color onto an opaque backdrop.
fn composite(color: Color, backdrop: Color) -> Color {
    let alpha = color.a as f32 / 255.0;
    let over = |src: u8, dst: u8| (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8;
    Color::rgb(
        over(color.r, backdrop.r),
        over(color.g, backdrop.g),
        over(color.b, backdrop.b),
    )
}

fn to_term(color: Color) -> TermColor {
    TermColor::Rgb { r: color.r, g: color.g, b: color.b }
}
