//! Graphics Support through embedded-graphics
//!
//! Both the bare [`Framebuffer`] and the [`St7565r`] driver are draw targets.
//! Drawing on the driver follows its update mode: deferred drivers only touch
//! the framebuffer, immediate drivers flush every changed byte.
//! Pixels outside the screen are dropped, as embedded-graphics expects.

use core::convert::Infallible;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::driver::St7565r;
use crate::error::Error;
use crate::framebuffer::Framebuffer;
use crate::interface::Interface;
use crate::{HEIGHT, WIDTH};

// Converts an embedded-graphics point into screen coordinates
fn on_screen(point: Point) -> Option<(u16, u16)> {
    let x = u16::try_from(point.x).ok()?;
    let y = u16::try_from(point.y).ok()?;
    (x < WIDTH && y < HEIGHT).then_some((x, y))
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH.into(), HEIGHT.into())
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((x, y)) = on_screen(point) {
                self.put_pixel(x, y, color.into());
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.into());
        Ok(())
    }
}

impl<DI> OriginDimensions for St7565r<DI> {
    fn size(&self) -> Size {
        Size::new(WIDTH.into(), HEIGHT.into())
    }
}

impl<DI> DrawTarget for St7565r<DI>
where
    DI: Interface,
{
    type Color = BinaryColor;
    type Error = Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some((x, y)) = on_screen(point) {
                self.paint_pixel(color.into(), x, y)?;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::driver::Config;
    use crate::interface::tests::Recorder;
    use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

    #[test]
    fn rectangle_lands_in_the_framebuffer() {
        let mut fb = Framebuffer::new();
        Rectangle::new(Point::new(0, 0), Size::new(8, 8))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .unwrap();
        for column in 0..8 {
            assert_eq!(fb.byte(column, 0), Some(0xFF));
        }
        assert_eq!(fb.byte(8, 0), Some(0x00));
        assert_eq!(fb.byte(0, 1), Some(0x00));
    }

    #[test]
    fn off_screen_pixels_are_dropped() {
        let mut fb = Framebuffer::new();
        Line::new(Point::new(-10, 31), Point::new(140, 31))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut fb)
            .unwrap();
        for x in 0..WIDTH {
            assert_eq!(fb.pixel(x, 31), Some(Color::On));
        }
        assert_eq!(fb.size(), Size::new(128, 32));
    }

    #[test]
    fn corner_pixels_are_drawn_and_erased() {
        let mut fb = Framebuffer::new();
        let corners = [
            Point::new(0, 0),
            Point::new(127, 0),
            Point::new(0, 31),
            Point::new(127, 31),
        ];
        fb.draw_iter(corners.iter().map(|&p| Pixel(p, BinaryColor::On)))
            .unwrap();
        assert_eq!(fb.byte(127, 3), Some(0x80));
        assert_eq!(fb.byte(0, 0), Some(0x01));

        fb.draw_iter([Pixel(Point::new(127, 31), BinaryColor::Off)])
            .unwrap();
        assert_eq!(fb.pixel(127, 31), Some(Color::Off));
        assert_eq!(fb.pixel(0, 31), Some(Color::On));
    }

    #[test]
    fn drawing_on_a_deferred_driver_stays_in_memory() {
        let mut display = St7565r::new(Recorder::default(), Config::default());
        Pixel(Point::new(3, 9), BinaryColor::On)
            .draw(&mut display)
            .unwrap();
        assert_eq!(display.pixel(3, 9), Some(Color::On));

        DrawTarget::clear(&mut display, BinaryColor::On).unwrap();
        assert!(display.framebuffer().buffer().iter().all(|&b| b == 0xFF));
        assert!(display.release().sent.is_empty());
    }
}
