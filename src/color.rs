//! Pixel state of the monochrome panel

#[cfg(feature = "graphics")]
use embedded_graphics::pixelcolor::BinaryColor;

/// State of a single pixel. `On` drives the liquid crystal (dark pixel on the
/// NHD-C12832A1Z), `Off` leaves it transparent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Color {
    /// Erased pixel, bit cleared in display RAM
    #[default]
    Off,
    /// Drawn pixel, bit set in display RAM
    On,
}

impl Color {
    /// Byte value that sets all 8 pixels of a page column to this color
    pub fn get_byte_value(self) -> u8 {
        match self {
            Color::Off => 0x00,
            Color::On => 0xFF,
        }
    }

    /// The opposite color
    pub fn inverse(self) -> Self {
        match self {
            Color::Off => Color::On,
            Color::On => Color::Off,
        }
    }

    /// Whether the pixel bit is set
    pub fn is_on(self) -> bool {
        self == Color::On
    }
}

impl From<bool> for Color {
    fn from(on: bool) -> Self {
        if on {
            Color::On
        } else {
            Color::Off
        }
    }
}

#[cfg(feature = "graphics")]
impl From<BinaryColor> for Color {
    fn from(color: BinaryColor) -> Self {
        match color {
            BinaryColor::On => Color::On,
            BinaryColor::Off => Color::Off,
        }
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for BinaryColor {
    fn from(color: Color) -> Self {
        match color {
            Color::On => BinaryColor::On,
            Color::Off => BinaryColor::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_values() {
        assert_eq!(Color::On.get_byte_value(), 0xFF);
        assert_eq!(Color::Off.get_byte_value(), 0x00);
        assert_eq!(Color::On.inverse(), Color::Off);
        assert_eq!(Color::from(true), Color::On);
    }
}
