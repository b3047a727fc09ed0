//! Bitmap fonts
//!
//! Glyph tables are row-major: every glyph row is `ceil(width / 8)` bytes,
//! most significant bit leftmost, and glyphs follow each other in character
//! order starting at `first_char`.

use crate::error::Error;
use crate::framebuffer::bytes_per_row;

/// Geometry and glyph table of a fixed-width font
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Font {
    glyphs: &'static [u8],
    width: u8,
    height: u8,
    first_char: u8,
    last_char: u8,
}

impl Font {
    /// Describe a glyph table. Fails when the geometry is empty, the range is
    /// reversed, or the table is too short to hold every glyph in the range.
    pub fn new(
        glyphs: &'static [u8],
        width: u8,
        height: u8,
        first_char: u8,
        last_char: u8,
    ) -> Result<Self, Error> {
        if width == 0 || height == 0 || first_char > last_char {
            return Err(Error::InvalidFont);
        }
        let font = Self {
            glyphs,
            width,
            height,
            first_char,
            last_char,
        };
        let glyph_count = usize::from(last_char - first_char) + 1;
        if glyphs.len() < glyph_count * font.bytes_per_glyph() {
            return Err(Error::InvalidFont);
        }
        Ok(font)
    }

    /// Glyph width in pixels
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Glyph height in pixels
    pub fn height(&self) -> u8 {
        self.height
    }

    /// First representable character
    pub fn first_char(&self) -> u8 {
        self.first_char
    }

    /// Last representable character
    pub fn last_char(&self) -> u8 {
        self.last_char
    }

    /// Bytes in one glyph row
    pub fn bytes_per_row(&self) -> usize {
        bytes_per_row(usize::from(self.width))
    }

    /// Bytes in one glyph
    pub fn bytes_per_glyph(&self) -> usize {
        self.bytes_per_row() * usize::from(self.height)
    }

    /// Whether `c` has a glyph in this font
    pub fn contains(&self, c: char) -> bool {
        (u32::from(self.first_char)..=u32::from(self.last_char)).contains(&u32::from(c))
    }

    /// Glyph bytes for `c`
    pub fn glyph(&self, c: char) -> Result<&'static [u8], Error> {
        if !self.contains(c) {
            return Err(Error::UnsupportedChar(c));
        }
        let offset = (c as usize - usize::from(self.first_char)) * self.bytes_per_glyph();
        Ok(&self.glyphs[offset..offset + self.bytes_per_glyph()])
    }
}
