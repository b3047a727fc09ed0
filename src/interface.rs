//! Transport between the driver and the ST7565R
//!
//! The controller has a write-only serial interface: every byte is either a
//! command (A0 low) or display data (A0 high). The [`Interface`] trait is
//! the only way the driver reaches the hardware, so a backend is chosen by the
//! type handed to [`crate::driver::St7565r::new`].

use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use log::trace;

/// How long RES is held low, and how long to wait after releasing it
pub const RESET_DELAY_MS: u32 = 100;

/// Byte level access to the controller.
pub trait Interface {
    /// Send a single command byte
    fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        self.cmds(&[command])
    }

    /// Send several command bytes back to back
    fn cmds(&mut self, commands: &[u8]) -> Result<(), DisplayError>;

    /// Send display RAM data at the current page/column address
    fn data(&mut self, data: &[u8]) -> Result<(), DisplayError>;

    /// Pulse the reset line and wait for the controller to come back
    fn hard_reset(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError>;
}

/// SPI device plus the A0 (register select) and RES pins.
///
/// Chip select is owned by the [`SpiDevice`].
pub struct SpiDisplayInterface<SPI, A0, RST> {
    spi: SPI,
    a0: A0,
    rst: RST,
}

impl<SPI, A0, RST> SpiDisplayInterface<SPI, A0, RST>
where
    SPI: SpiDevice,
    A0: OutputPin,
    RST: OutputPin,
{
    /// Wrap the bus and control pins
    pub fn new(spi: SPI, a0: A0, rst: RST) -> Self {
        Self { spi, a0, rst }
    }

    /// Give the bus and pins back
    pub fn release(self) -> (SPI, A0, RST) {
        (self.spi, self.a0, self.rst)
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.spi
            .write(bytes)
            .map_err(|_| DisplayError::BusWriteError)
    }
}

impl<SPI, A0, RST> Interface for SpiDisplayInterface<SPI, A0, RST>
where
    SPI: SpiDevice,
    A0: OutputPin,
    RST: OutputPin,
{
    fn cmds(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        trace!("cmd {:02x?}", commands);
        self.a0.set_low().map_err(|_| DisplayError::DCError)?;
        self.write(commands)
    }

    fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        trace!("data {} bytes", data.len());
        self.a0.set_high().map_err(|_| DisplayError::DCError)?;
        self.write(data)
    }

    fn hard_reset(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(RESET_DELAY_MS);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(RESET_DELAY_MS);
        Ok(())
    }
}

/// Any `display-interface` transport (for example `display-interface-spi`)
/// plus the RES pin.
pub struct DataCommandInterface<DI, RST> {
    di: DI,
    rst: RST,
}

impl<DI, RST> DataCommandInterface<DI, RST>
where
    DI: WriteOnlyDataCommand,
    RST: OutputPin,
{
    /// Wrap a data/command transport
    pub fn new(di: DI, rst: RST) -> Self {
        Self { di, rst }
    }

    /// Give the transport and reset pin back
    pub fn release(self) -> (DI, RST) {
        (self.di, self.rst)
    }
}

impl<DI, RST> Interface for DataCommandInterface<DI, RST>
where
    DI: WriteOnlyDataCommand,
    RST: OutputPin,
{
    fn cmds(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        self.di.send_commands(DataFormat::U8(commands))
    }

    fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.di.send_data(DataFormat::U8(data))
    }

    fn hard_reset(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError> {
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(RESET_DELAY_MS);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(RESET_DELAY_MS);
        Ok(())
    }
}
