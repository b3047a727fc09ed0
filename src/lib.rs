//! ST7565R LCD Driver
//!
//! Used in the [Newhaven NHD-C12832A1Z](https://newhavendisplay.com/content/specs/NHD-C12832A1Z-FSW-FBW-3V3.pdf)
//! 128x32 monochrome panel, driven over SPI with an A0 (register select) and a
//! RES line.
//!
//! ## Architecture
//!
//! - **Interface** ([`interface::Interface`]) is the only path to the hardware:
//!   command bytes, data bytes and the reset pulse.
//! - **Framebuffer** ([`framebuffer::Framebuffer`]) mirrors display RAM, one bit
//!   per pixel in 8 row pages.
//! - **Paint engine** ([`paint`]) draws pixels, rectangles, glyphs, strings and
//!   bitmaps into anything implementing [`paint::Canvas`].
//! - **Driver** ([`driver::St7565r`]) owns all of the above and keeps the panel
//!   in sync, either byte by byte as pixels change or by diffing against the
//!   last flushed frame.
//!
//! ## Usage
//!
//! ```rust, ignore
//! use st7565r::prelude::*;
//!
//! // 1. Wrap the SPI device and control pins
//! let interface = SpiDisplayInterface::new(spi_device, a0, rst);
//!
//! // 2. Create and bring up the driver
//! let mut display = St7565r::new(interface, Config::default());
//! display.setup(&mut delay)?;
//!
//! // 3. Paint into the framebuffer
//! display.configure_font(Font::new(&FONT_5X7, 5, 7, b' ', b'~')?);
//! display.paint_string("Hello\r\nworld", 0, 0)?;
//! display.paint_rectangle(Color::On, 100, 4, 20, 20)?;
//!
//! // 4. Send only the bytes that changed
//! display.update_display()?;
//! ```
//!
//! With the `graphics` feature (on by default) the driver is also an
//! `embedded-graphics` draw target.
//!
#![no_std]
#![deny(missing_docs)]
#![allow(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

#[cfg(test)]
extern crate std;

pub mod backlight;
mod cmd;
pub mod color;
pub mod driver;
pub mod error;
mod flag;
pub mod font;
pub mod framebuffer;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod interface;
pub mod paint;

/// Display width in pixels
pub const WIDTH: u16 = 128;

/// Display height in pixels
pub const HEIGHT: u16 = 32;

pub use error::Error;

/// Useful exports
pub mod prelude {
    pub use crate::backlight::Backlight;
    pub use crate::color::Color;
    pub use crate::driver::{Config, FrameRetention, St7565r, UpdateMode};
    pub use crate::error::Error;
    pub use crate::font::Font;
    pub use crate::interface::{DataCommandInterface, Interface, SpiDisplayInterface};
}
