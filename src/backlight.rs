//! PWM driven LED backlight of the NHD-C12832A1Z

use embedded_hal::pwm::SetDutyCycle;
use log::debug;

use crate::error::Error;

/// Highest brightness, in percent of the PWM period
pub const MAX_BRIGHTNESS: u8 = 100;

/// Backlight on a PWM channel
pub struct Backlight<P> {
    pwm: P,
    level: u8,
    rising: bool,
}

impl<P> Backlight<P>
where
    P: SetDutyCycle,
{
    /// Wrap a PWM channel. The duty cycle is left alone until the first call.
    pub fn new(pwm: P) -> Self {
        Self {
            pwm,
            level: 0,
            rising: true,
        }
    }

    /// Set the brightness in percent. Values outside 0..=100 are clamped.
    /// Returns the level applied.
    pub fn set_brightness(&mut self, brightness: i32) -> Result<u8, Error> {
        let level = brightness.clamp(0, i32::from(MAX_BRIGHTNESS)) as u8;
        if i32::from(level) != brightness {
            debug!("backlight {} clamped to {}", brightness, level);
        }
        self.apply(level)?;
        Ok(level)
    }

    /// Advance a triangle wave by `speed` percent per call, bouncing between
    /// off and full brightness. Returns the level applied.
    pub fn blink(&mut self, speed: u8) -> Result<u8, Error> {
        let step = i16::from(speed);
        let mut next = i16::from(self.level) + if self.rising { step } else { -step };
        if next >= i16::from(MAX_BRIGHTNESS) {
            next = i16::from(MAX_BRIGHTNESS);
            self.rising = false;
        } else if next <= 0 {
            next = 0;
            self.rising = true;
        }
        let level = next as u8;
        self.apply(level)?;
        Ok(level)
    }

    /// Last brightness applied
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Give the PWM channel back
    pub fn release(self) -> P {
        self.pwm
    }

    fn apply(&mut self, level: u8) -> Result<(), Error> {
        self.pwm
            .set_duty_cycle_percent(level)
            .map_err(|_| Error::Backlight)?;
        self.level = level;
        Ok(())
    }
}
