//! In-memory shadow of the display RAM
//!
//! The ST7565R addresses its RAM in pages: each byte covers one column and 8
//! vertically stacked rows, least significant bit on top. The framebuffer
//! uses exactly that layout so a byte can go to the panel unchanged.

use crate::color::Color;
use crate::error::Error;
use crate::{HEIGHT, WIDTH};

/// Number of 8 row pages on the panel
pub const PAGES: usize = pages_for_height(HEIGHT as usize);

/// Size of a full screen bitmap in bytes
pub const BUFFER_LEN: usize = buffer_len(WIDTH as usize, HEIGHT as usize);

/// Pages needed to cover `height` rows, rounding up
#[must_use]
pub const fn pages_for_height(height: usize) -> usize {
    height.div_ceil(8)
}

/// Bytes needed to hold `width` horizontally packed pixels, rounding up
#[must_use]
pub const fn bytes_per_row(width: usize) -> usize {
    width.div_ceil(8)
}

/// Computes the needed buffer length for a page-major bitmap
#[must_use]
pub const fn buffer_len(width: usize, height: usize) -> usize {
    pages_for_height(height) * width
}

//returns index position in the buffer and the bit inside that byte
fn find_position(x: u16, y: u16) -> (usize, u8) {
    (
        usize::from(y / 8) * WIDTH as usize + usize::from(x),
        1 << (y % 8),
    )
}

fn outside_display(x: u16, y: u16) -> bool {
    x >= WIDTH || y >= HEIGHT
}

/// One bit per pixel, `PAGES` x `WIDTH` bytes
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    buffer: [u8; BUFFER_LEN],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let lit = self.buffer.iter().filter(|&&b| b != 0).count();
        f.debug_struct("Framebuffer")
            .field("non_zero_bytes", &lit)
            .finish()
    }
}

impl Framebuffer {
    /// A blank framebuffer
    pub const fn new() -> Self {
        Self {
            buffer: [0; BUFFER_LEN],
        }
    }

    /// Set or clear one pixel. Off-screen coordinates are rejected.
    pub fn set_pixel(&mut self, x: u16, y: u16, color: Color) -> Result<(), Error> {
        if outside_display(x, y) {
            return Err(Error::OutOfBounds);
        }
        self.put_pixel(x, y, color);
        Ok(())
    }

    /// Set or clear a pixel the caller already knows is on screen
    pub(crate) fn put_pixel(&mut self, x: u16, y: u16, color: Color) {
        let (index, bit) = find_position(x, y);
        match color {
            Color::On => self.buffer[index] |= bit,
            Color::Off => self.buffer[index] &= !bit,
        }
    }

    /// Read one pixel, `None` when off-screen
    pub fn pixel(&self, x: u16, y: u16) -> Option<Color> {
        if outside_display(x, y) {
            return None;
        }
        let (index, bit) = find_position(x, y);
        Some(Color::from(self.buffer[index] & bit != 0))
    }

    /// Overwrite the whole byte at a page/column address
    pub fn set_byte(&mut self, column: u8, page: u8, value: u8) -> Result<(), Error> {
        let index = Self::index(column, page).ok_or(Error::OutOfBounds)?;
        self.buffer[index] = value;
        Ok(())
    }

    /// Byte at a page/column address, `None` when off-screen
    pub fn byte(&self, column: u8, page: u8) -> Option<u8> {
        Self::index(column, page).map(|i| self.buffer[i])
    }

    fn index(column: u8, page: u8) -> Option<usize> {
        let (column, page) = (usize::from(column), usize::from(page));
        if column >= WIDTH as usize || page >= PAGES {
            return None;
        }
        Some(page * WIDTH as usize + column)
    }

    /// Page and column holding pixel (x, y); callers check bounds first
    pub(crate) fn address_of(x: u16, y: u16) -> (u8, u8) {
        ((y / 8) as u8, x as u8)
    }

    /// Erase every pixel
    pub fn clear(&mut self) {
        self.fill(Color::Off);
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: Color) {
        self.buffer.fill(color.get_byte_value());
    }

    /// Replace the contents with a full screen bitmap in display RAM layout
    pub fn load(&mut self, bitmap: &[u8]) -> Result<(), Error> {
        if bitmap.len() != BUFFER_LEN {
            return Err(Error::BitmapSize {
                expected: BUFFER_LEN,
                actual: bitmap.len(),
            });
        }
        self.buffer.copy_from_slice(bitmap);
        Ok(())
    }

    /// Bytes of one page, left to right
    pub fn page(&self, page: usize) -> &[u8] {
        let start = page * WIDTH as usize;
        &self.buffer[start..start + WIDTH as usize]
    }

    /// Returns the buffer
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_division_boundaries() {
        assert_eq!(pages_for_height(0), 0);
        assert_eq!(pages_for_height(8), 1);
        assert_eq!(pages_for_height(9), 2);
        assert_eq!(pages_for_height(32), 4);
        assert_eq!(bytes_per_row(0), 0);
        assert_eq!(bytes_per_row(8), 1);
        assert_eq!(bytes_per_row(9), 2);
        assert_eq!(bytes_per_row(32), 4);
        assert_eq!(PAGES, 4);
        assert_eq!(BUFFER_LEN, 512);
    }

    #[test]
    fn every_pixel_reads_back() {
        let mut fb = Framebuffer::new();
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                fb.set_pixel(x, y, Color::On).unwrap();
                assert_eq!(fb.pixel(x, y), Some(Color::On));
                fb.set_pixel(x, y, Color::Off).unwrap();
                assert_eq!(fb.pixel(x, y), Some(Color::Off));
            }
        }
        assert!(fb.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn pixel_bit_layout_is_lsb_on_top() {
        let mut fb = Framebuffer::new();
        fb.set_pixel(10, 17, Color::On).unwrap();
        // page 2, row 1 inside the page
        assert_eq!(fb.byte(10, 2), Some(0b0000_0010));
        assert_eq!(fb.buffer()[2 * 128 + 10], 0b0000_0010);

        fb.set_pixel(127, 31, Color::On).unwrap();
        assert_eq!(fb.buffer()[BUFFER_LEN - 1], 0x80);
    }

    #[test]
    fn clearing_a_pixel_keeps_its_neighbours() {
        let mut fb = Framebuffer::new();
        fb.set_byte(5, 0, 0xFF).unwrap();
        fb.set_pixel(5, 3, Color::Off).unwrap();
        assert_eq!(fb.byte(5, 0), Some(0b1111_0111));
    }

    #[test]
    fn out_of_bounds_is_rejected_not_clamped() {
        let mut fb = Framebuffer::new();
        assert!(matches!(fb.set_pixel(128, 0, Color::On), Err(Error::OutOfBounds)));
        assert!(matches!(fb.set_pixel(0, 32, Color::On), Err(Error::OutOfBounds)));
        assert!(matches!(fb.set_byte(128, 0, 0xFF), Err(Error::OutOfBounds)));
        assert!(matches!(fb.set_byte(0, 4, 0xFF), Err(Error::OutOfBounds)));
        assert_eq!(fb, Framebuffer::new());
        assert_eq!(fb.pixel(200, 1), None);
        assert_eq!(fb.byte(0, 4), None);
    }

    #[test]
    fn fullscreen_round_trip() {
        let mut bitmap = [0u8; BUFFER_LEN];
        for (i, b) in bitmap.iter_mut().enumerate() {
            *b = (i * 7 + 3) as u8;
        }
        let mut fb = Framebuffer::new();
        fb.load(&bitmap).unwrap();
        assert_eq!(fb.buffer(), &bitmap[..]);
        assert_eq!(fb.page(1), &bitmap[128..256]);
    }

    #[test]
    fn load_rejects_wrong_length() {
        let mut fb = Framebuffer::new();
        fb.fill(Color::On);
        let err = fb.load(&[0u8; 100]).unwrap_err();
        assert!(matches!(
            err,
            Error::BitmapSize {
                expected: 512,
                actual: 100
            }
        ));
        assert!(fb.buffer().iter().all(|&b| b == 0xFF));
    }
}
