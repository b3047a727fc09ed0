//! Driver error type

pub use display_interface::DisplayError;

/// Everything that can go wrong inside the driver.
///
/// Geometry and font errors are rejections: the call returns early and
/// neither the framebuffer nor the panel is touched.
#[derive(Debug, Clone)]
pub enum Error {
    /// Coordinates, extents or page address outside the 128x32 screen
    OutOfBounds,
    /// Character outside the active font's `first_char..=last_char` range
    UnsupportedChar(char),
    /// Text was painted before a font was configured
    NoFont,
    /// Font geometry is zero or the glyph table is too short for its range
    InvalidFont,
    /// Bitmap length does not match its declared geometry
    BitmapSize {
        /// Bytes required by the geometry
        expected: usize,
        /// Bytes supplied by the caller
        actual: usize,
    },
    /// Hardware access before `setup` or after `shutdown`
    NotInitialized,
    /// The SPI bus or a control pin failed. The snapshot is left untouched so
    /// the next `update_display` retries the same bytes.
    Interface(DisplayError),
    /// The PWM channel rejected the backlight duty cycle
    Backlight,
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Interface(e)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "coordinates outside the display"),
            Self::UnsupportedChar(c) => write!(f, "character {c:?} not in the active font"),
            Self::NoFont => write!(f, "no font configured"),
            Self::InvalidFont => write!(f, "font geometry does not match its glyph table"),
            Self::BitmapSize { expected, actual } => {
                write!(f, "bitmap has {actual} bytes, expected {expected}")
            }
            Self::NotInitialized => write!(f, "display not set up"),
            Self::Interface(e) => write!(f, "display interface error: {e:?}"),
            Self::Backlight => write!(f, "backlight PWM error"),
        }
    }
}

impl core::error::Error for Error {}
