//! Paint engine
//!
//! Rasterizes rectangles, glyphs, strings and bitmaps into anything that can
//! set a single pixel. Every operation validates its whole footprint before
//! touching the first pixel, so a rejected call leaves the target unchanged.

use log::debug;

use crate::color::Color;
use crate::error::Error;
use crate::font::Font;
use crate::framebuffer::{buffer_len, Framebuffer};
use crate::{HEIGHT, WIDTH};

/// Pixel sink the paint engine draws into
pub trait Canvas {
    /// Set or clear one pixel
    fn set_pixel(&mut self, x: u16, y: u16, color: Color) -> Result<(), Error>;
}

impl Canvas for Framebuffer {
    fn set_pixel(&mut self, x: u16, y: u16, color: Color) -> Result<(), Error> {
        Framebuffer::set_pixel(self, x, y, color)
    }
}

// Origin on screen and the w x h region inside it
fn fits(x: u32, y: u32, w: u32, h: u32) -> bool {
    let (width, height) = (u32::from(WIDTH), u32::from(HEIGHT));
    x < width && y < height && x + w <= width && y + h <= height
}

/// Fill a `w` x `h` rectangle with `color`, one pixel at a time
pub fn paint_rectangle<C: Canvas + ?Sized>(
    canvas: &mut C,
    color: Color,
    x: u16,
    y: u16,
    w: u16,
    h: u16,
) -> Result<(), Error> {
    if !fits(x.into(), y.into(), w.into(), h.into()) {
        debug!("rectangle {}x{} at ({}, {}) rejected", w, h, x, y);
        return Err(Error::OutOfBounds);
    }
    for row in y..y + h {
        for col in x..x + w {
            canvas.set_pixel(col, row, color)?;
        }
    }
    Ok(())
}

/// Draw the glyph for `c` with its top-left corner at (x, y).
///
/// Set bits draw and clear bits erase, so the glyph cell is painted opaquely.
/// Padding bits past the glyph width in the last byte of a row are ignored.
pub fn paint_char<C: Canvas + ?Sized>(
    canvas: &mut C,
    font: &Font,
    c: char,
    x: u16,
    y: u16,
) -> Result<(), Error> {
    let glyph = font.glyph(c)?;
    let width = usize::from(font.width());
    if !fits(x.into(), y.into(), width as u32, font.height().into()) {
        debug!("glyph {:?} at ({}, {}) rejected", c, x, y);
        return Err(Error::OutOfBounds);
    }

    for (row, row_bytes) in glyph.chunks(font.bytes_per_row()).enumerate() {
        let py = y + row as u16;
        for (i, &byte) in row_bytes.iter().enumerate() {
            for bit in 0..8 {
                let col = i * 8 + bit;
                if col >= width {
                    break;
                }
                let color = Color::from(byte & (0x80 >> bit) != 0);
                canvas.set_pixel(x + col as u16, py, color)?;
            }
        }
    }
    Ok(())
}

/// Lay out `s` starting at (x, y) with the fixed advance of `font`.
///
/// Control characters move the pen without drawing:
/// - `\n` moves down by the glyph height plus one pixel, x is kept
/// - `\r` returns to the starting x
/// - `\t` advances to the next tab stop, one every two glyph widths
/// - `\0` ends the string
///
/// Every other character must exist in the font, otherwise nothing is drawn.
/// Glyphs that land partly off-screen are skipped and layout continues.
pub fn paint_string<C: Canvas + ?Sized>(
    canvas: &mut C,
    font: &Font,
    s: &str,
    x: u16,
    y: u16,
) -> Result<(), Error> {
    if x >= WIDTH || y >= HEIGHT {
        debug!("string at ({}, {}) rejected", x, y);
        return Err(Error::OutOfBounds);
    }
    if let Some(c) = s
        .chars()
        .take_while(|&c| c != '\0')
        .find(|&c| !matches!(c, '\n' | '\r' | '\t') && !font.contains(c))
    {
        debug!("string contains unsupported character {:?}", c);
        return Err(Error::UnsupportedChar(c));
    }

    let advance = u32::from(font.width());
    let tab = 2 * advance;
    let origin_x = u32::from(x);
    let (mut pen_x, mut pen_y) = (origin_x, u32::from(y));

    for c in s.chars() {
        match c {
            '\0' => break,
            '\n' => pen_y += u32::from(font.height()) + 1,
            '\r' => pen_x = origin_x,
            '\t' => pen_x = origin_x + ((pen_x - origin_x) / tab + 1) * tab,
            _ => {
                if fits(pen_x, pen_y, advance, font.height().into()) {
                    paint_char(canvas, font, c, pen_x as u16, pen_y as u16)?;
                } else {
                    debug!("glyph {:?} at ({}, {}) off-screen, skipped", c, pen_x, pen_y);
                }
                pen_x += advance;
            }
        }
    }
    Ok(())
}

/// Blit a `w` x `h` bitmap with its top-left corner at (x, y).
///
/// The bitmap uses the display RAM layout restricted to the region:
/// `ceil(h / 8)` pages of `w` bytes, bit `k` of byte `page * w + col` being
/// row `page * 8 + k`. A 128x32 bitmap at (0, 0) is a full screen image.
pub fn paint_bitmap<C: Canvas + ?Sized>(
    canvas: &mut C,
    bitmap: &[u8],
    w: u16,
    h: u16,
    x: u16,
    y: u16,
) -> Result<(), Error> {
    let expected = buffer_len(w.into(), h.into());
    if bitmap.len() != expected {
        return Err(Error::BitmapSize {
            expected,
            actual: bitmap.len(),
        });
    }
    if !fits(x.into(), y.into(), w.into(), h.into()) {
        debug!("bitmap {}x{} at ({}, {}) rejected", w, h, x, y);
        return Err(Error::OutOfBounds);
    }

    let stride = usize::from(w);
    for row in 0..h {
        let page_offset = usize::from(row / 8) * stride;
        let bit = 1 << (row % 8);
        for col in 0..w {
            let color = Color::from(bitmap[page_offset + usize::from(col)] & bit != 0);
            canvas.set_pixel(x + col, y + row, color)?;
        }
    }
    Ok(())
}
