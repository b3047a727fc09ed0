//! Driver for interacting with the ST7565R display controller
use embedded_hal::delay::DelayNs;
use log::{debug, trace};

use crate::cmd::{self, Cmd};
use crate::color::Color;
use crate::error::Error;
use crate::flag::Flag;
use crate::font::Font;
use crate::framebuffer::{Framebuffer, BUFFER_LEN, PAGES};
use crate::interface::Interface;
use crate::paint::{self, Canvas};

/// Bring-up sequence of the NHD-C12832A1Z panel. The order matters and the
/// volume value really is the ratio-0 command byte.
pub const DEFAULT_INIT_SEQUENCE: &[InitStep] = &[
    InitStep::HardReset,
    InitStep::Cmd(Cmd::ADC_NORMAL),
    InitStep::Cmd(Cmd::DISPLAY_OFF),
    InitStep::Cmd(Cmd::REVERSE_SCAN_DIRECTION),
    InitStep::Cmd(Cmd::LCD_BIAS_1_DIV_6),
    InitStep::Cmd(cmd::power_control(Flag::POWER_ALL_ON)),
    InitStep::Cmd(cmd::resistor_ratio(Flag::RESISTOR_RATIO_PANEL)),
    InitStep::Cmds(&[
        Cmd::ELECTRONIC_VOLUME_MODE_SET,
        Flag::ELECTRONIC_VOLUME_PANEL,
    ]),
    InitStep::Cmd(Cmd::DISPLAY_ON),
];

/// All zero full screen bitmap, painted when no bitmap is supplied
pub static BLANK_BITMAP: [u8; BUFFER_LEN] = [0; BUFFER_LEN];

/// Steps that a panel-specific init sequence can contain.
/// Keep variants minimal so sequences can live in static arrays.
#[derive(Clone, Copy, Debug)]
pub enum InitStep {
    /// Pulse the RES line
    HardReset,
    /// Send the internal reset command
    SoftReset,
    /// Block for a number of milliseconds
    DelayMs(u8),
    /// Send a bare command byte
    Cmd(u8),
    /// Send a multi byte command
    Cmds(&'static [u8]),
}

/// When painted pixels reach the panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateMode {
    /// Every mutated byte is written to the panel inside the paint call
    Immediate,
    /// Paint calls only touch the framebuffer; `update_display` sends the
    /// bytes that differ from the last flushed frame
    #[default]
    Deferred,
}

/// What happens to the framebuffer after a deferred update
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameRetention {
    /// Keep the flushed frame, later paints are applied on top of it
    #[default]
    Retain,
    /// Start every frame blank; callers repaint the whole screen each frame
    Clear,
}

/// Construction time settings
#[derive(Clone, Copy, Debug)]
pub struct Config {
    update_mode: UpdateMode,
    retention: FrameRetention,
    init_sequence: &'static [InitStep],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            update_mode: UpdateMode::default(),
            retention: FrameRetention::default(),
            init_sequence: DEFAULT_INIT_SEQUENCE,
        }
    }
}

impl Config {
    /// Choose immediate or deferred updates
    pub const fn with_update_mode(mut self, update_mode: UpdateMode) -> Self {
        self.update_mode = update_mode;
        self
    }

    /// Choose what `update_display` leaves in the framebuffer
    pub const fn with_retention(mut self, retention: FrameRetention) -> Self {
        self.retention = retention;
        self
    }

    /// Replace the bring-up sequence run by `setup`
    pub const fn with_init_sequence(mut self, init_sequence: &'static [InitStep]) -> Self {
        self.init_sequence = init_sequence;
        self
    }

    /// Configured update mode
    pub fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }

    /// Configured frame retention
    pub fn retention(&self) -> FrameRetention {
        self.retention
    }

    /// Configured bring-up sequence
    pub fn init_sequence(&self) -> &'static [InitStep] {
        self.init_sequence
    }
}

/// A 128x32 ST7565R panel behind an [`Interface`].
pub struct St7565r<DI> {
    interface: DI,
    config: Config,
    framebuffer: Framebuffer,
    /// Last frame flushed to the panel, only kept in deferred mode
    snapshot: Option<Framebuffer>,
    font: Option<Font>,
    start_line: u8,
    initialized: bool,
    /// Framebuffer touched since the last successful flush
    dirty: bool,
}

impl<DI> St7565r<DI>
where
    DI: Interface,
{
    /// Create the driver. Nothing is sent until [`St7565r::setup`].
    pub fn new(interface: DI, config: Config) -> Self {
        debug!("creating new St7565r instance ({:?})", config.update_mode);
        let snapshot = match config.update_mode {
            UpdateMode::Deferred => Some(Framebuffer::new()),
            UpdateMode::Immediate => None,
        };
        Self {
            interface,
            config,
            framebuffer: Framebuffer::new(),
            snapshot,
            font: None,
            start_line: 0,
            initialized: false,
            dirty: false,
        }
    }

    /// Reset the controller, run the init sequence and blank the panel.
    pub fn setup(&mut self, delay: &mut impl DelayNs) -> Result<(), Error> {
        debug!("setting up st7565r");
        self.initialized = false;
        self.framebuffer.clear();
        if let Some(snapshot) = self.snapshot.as_mut() {
            snapshot.clear();
        }
        self.start_line = 0;

        for step in self.config.init_sequence {
            debug!("init step: {:?}", step);
            match *step {
                InitStep::HardReset => self.interface.hard_reset(delay)?,
                InitStep::SoftReset => self.interface.cmd(Cmd::RESET)?,
                InitStep::DelayMs(ms) => delay.delay_ms(u32::from(ms)),
                InitStep::Cmd(c) => self.interface.cmd(c)?,
                InitStep::Cmds(c) => self.interface.cmds(c)?,
            }
        }

        // display RAM content is undefined after reset
        self.write_frame()?;
        self.initialized = true;
        debug!("init sequence complete");
        Ok(())
    }

    /// Blank the panel and put the controller into power save
    pub fn shutdown(&mut self) -> Result<(), Error> {
        self.ensure_initialized()?;
        debug!("shutting down st7565r");
        self.interface
            .cmds(&[Cmd::DISPLAY_OFF, Cmd::ALL_POINTS_ON])?;
        self.initialized = false;
        Ok(())
    }

    /// Give the interface back
    pub fn release(self) -> DI {
        self.interface
    }

    /// Settings chosen at construction
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Immediate or deferred updates
    pub fn update_mode(&self) -> UpdateMode {
        self.config.update_mode
    }

    /// Whether `setup` has completed and `shutdown` has not been called
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current framebuffer contents
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Last frame flushed to the panel, `None` in immediate mode
    pub fn snapshot(&self) -> Option<&Framebuffer> {
        self.snapshot.as_ref()
    }

    /// Read one framebuffer pixel
    pub fn pixel(&self, x: u16, y: u16) -> Option<Color> {
        self.framebuffer.pixel(x, y)
    }

    /// Make `font` the font used by the next text paint
    pub fn configure_font(&mut self, font: Font) {
        debug!(
            "configuring {}x{} font {:?}..={:?}",
            font.width(),
            font.height(),
            font.first_char() as char,
            font.last_char() as char
        );
        self.font = Some(font);
    }

    /// The active font
    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    /// Erase the whole screen
    pub fn clear(&mut self) -> Result<(), Error> {
        self.fill(Color::Off)
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: Color) -> Result<(), Error> {
        if self.config.update_mode == UpdateMode::Immediate {
            self.ensure_initialized()?;
            self.framebuffer.fill(color);
            return self.write_frame();
        }
        self.framebuffer.fill(color);
        self.dirty = true;
        Ok(())
    }

    /// Set or clear one pixel
    pub fn paint_pixel(&mut self, color: Color, x: u16, y: u16) -> Result<(), Error> {
        self.paint_with(|canvas| canvas.set_pixel(x, y, color))
    }

    /// Overwrite a whole byte at a page/column address
    pub fn set_byte(&mut self, column: u8, page: u8, value: u8) -> Result<(), Error> {
        if self.config.update_mode == UpdateMode::Immediate {
            self.ensure_initialized()?;
            self.framebuffer.set_byte(column, page, value)?;
            return write_byte(&mut self.interface, column, page, value);
        }
        self.framebuffer.set_byte(column, page, value)?;
        self.dirty = true;
        Ok(())
    }

    /// Fill a `w` x `h` rectangle with `color`
    pub fn paint_rectangle(
        &mut self,
        color: Color,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
    ) -> Result<(), Error> {
        self.paint_with(|canvas| paint::paint_rectangle(canvas, color, x, y, w, h))
    }

    /// Draw one character of the active font
    pub fn paint_char(&mut self, c: char, x: u16, y: u16) -> Result<(), Error> {
        let font = self.font.ok_or(Error::NoFont)?;
        self.paint_with(|canvas| paint::paint_char(canvas, &font, c, x, y))
    }

    /// Draw a string with the active font, see [`paint::paint_string`]
    pub fn paint_string(&mut self, s: &str, x: u16, y: u16) -> Result<(), Error> {
        let font = self.font.ok_or(Error::NoFont)?;
        self.paint_with(|canvas| paint::paint_string(canvas, &font, s, x, y))
    }

    /// Blit a `w` x `h` bitmap, see [`paint::paint_bitmap`]
    pub fn paint_bitmap(
        &mut self,
        bitmap: &[u8],
        w: u16,
        h: u16,
        x: u16,
        y: u16,
    ) -> Result<(), Error> {
        self.paint_with(|canvas| paint::paint_bitmap(canvas, bitmap, w, h, x, y))
    }

    /// Replace the whole screen with a bitmap in display RAM layout.
    /// `None` paints [`BLANK_BITMAP`].
    pub fn paint_fullscreen_bitmap(&mut self, bitmap: Option<&[u8]>) -> Result<(), Error> {
        let bitmap = bitmap.unwrap_or(&BLANK_BITMAP[..]);
        if self.config.update_mode == UpdateMode::Immediate {
            self.ensure_initialized()?;
            self.framebuffer.load(bitmap)?;
            return self.write_frame();
        }
        self.framebuffer.load(bitmap)?;
        self.dirty = true;
        Ok(())
    }

    /// Push the framebuffer to the panel and return the number of data bytes
    /// sent.
    ///
    /// In deferred mode only bytes that differ from the last flushed frame
    /// are sent; nothing at all goes out when nothing was painted since the
    /// last flush or the paints left the frame unchanged. In immediate mode
    /// the whole frame is rewritten.
    pub fn update_display(&mut self) -> Result<usize, Error> {
        self.ensure_initialized()?;
        if self.snapshot.is_none() {
            debug!("writing full frame");
            self.write_frame()?;
            return Ok(BUFFER_LEN);
        }
        if !self.dirty {
            trace!("update_display: nothing painted");
            return Ok(0);
        }

        let retention = self.config.retention;
        let Self {
            interface,
            framebuffer,
            snapshot: Some(snapshot),
            ..
        } = self
        else {
            return Ok(0);
        };
        let sent = flush_changes(interface, framebuffer, snapshot)?;
        debug!("update_display sent {} bytes", sent);

        snapshot.clone_from(framebuffer);
        if retention == FrameRetention::Clear {
            framebuffer.clear();
        }
        self.dirty = false;
        Ok(sent)
    }

    /// Switch the panel on or off without touching display RAM
    pub fn set_display_on(&mut self, on: bool) -> Result<(), Error> {
        self.ensure_initialized()?;
        self.interface.cmd(cmd::display_on(on))?;
        Ok(())
    }

    /// Electronic volume (contrast), 0..=63
    pub fn set_contrast(&mut self, volume: u8) -> Result<(), Error> {
        if volume > Flag::ELECTRONIC_VOLUME_MAX {
            return Err(Error::OutOfBounds);
        }
        self.ensure_initialized()?;
        debug!("setting contrast to {}", volume);
        self.interface
            .cmds(&[Cmd::ELECTRONIC_VOLUME_MODE_SET, volume])?;
        Ok(())
    }

    /// Swap lit and unlit pixels on the panel
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), Error> {
        self.ensure_initialized()?;
        self.interface.cmd(cmd::display_reverse(inverted))?;
        Ok(())
    }

    /// Light every pixel regardless of display RAM
    pub fn set_all_points_on(&mut self, on: bool) -> Result<(), Error> {
        self.ensure_initialized()?;
        self.interface.cmd(cmd::all_points(on))?;
        Ok(())
    }

    /// Display RAM line shown at the top of the panel, 0..=63
    pub fn set_start_line(&mut self, line: u8) -> Result<(), Error> {
        if line > 63 {
            return Err(Error::OutOfBounds);
        }
        self.ensure_initialized()?;
        self.interface.cmd(cmd::start_line(line))?;
        self.start_line = line;
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<(), Error> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    fn paint_with(
        &mut self,
        op: impl FnOnce(&mut dyn Canvas) -> Result<(), Error>,
    ) -> Result<(), Error> {
        match self.config.update_mode {
            UpdateMode::Deferred => {
                self.dirty = true;
                let canvas: &mut dyn Canvas = &mut self.framebuffer;
                op(canvas)
            }
            UpdateMode::Immediate => {
                self.ensure_initialized()?;
                let mut immediate = Immediate {
                    interface: &mut self.interface,
                    framebuffer: &mut self.framebuffer,
                };
                let canvas: &mut dyn Canvas = &mut immediate;
                op(canvas)
            }
        }
    }

    /// Write the whole framebuffer, one page at a time
    fn write_frame(&mut self) -> Result<(), Error> {
        trace!("write_frame");
        self.interface
            .cmds(&[Cmd::DISPLAY_OFF, cmd::start_line(self.start_line)])?;
        for page in 0..PAGES {
            self.interface.cmds(&[
                cmd::page_address(page as u8),
                cmd::column_msb(0),
                cmd::column_lsb(0),
            ])?;
            self.interface.data(self.framebuffer.page(page))?;
        }
        self.interface.cmd(Cmd::DISPLAY_ON)?;

        if let Some(snapshot) = self.snapshot.as_mut() {
            snapshot.clone_from(&self.framebuffer);
        }
        self.dirty = false;
        Ok(())
    }
}

/// Canvas that writes every mutated byte straight to the panel
struct Immediate<'a, DI> {
    interface: &'a mut DI,
    framebuffer: &'a mut Framebuffer,
}

impl<DI: Interface> Canvas for Immediate<'_, DI> {
    fn set_pixel(&mut self, x: u16, y: u16, color: Color) -> Result<(), Error> {
        self.framebuffer.set_pixel(x, y, color)?;
        let (page, column) = Framebuffer::address_of(x, y);
        let byte = self.framebuffer.byte(column, page).ok_or(Error::OutOfBounds)?;
        write_byte(self.interface, column, page, byte)
    }
}

// off, page, column, data, on
fn write_byte<DI: Interface>(
    interface: &mut DI,
    column: u8,
    page: u8,
    byte: u8,
) -> Result<(), Error> {
    trace!("write_byte page {} column {}: {:#04x}", page, column, byte);
    interface.cmds(&[
        Cmd::DISPLAY_OFF,
        cmd::page_address(page),
        cmd::column_msb(column),
        cmd::column_lsb(column),
    ])?;
    interface.data(&[byte])?;
    interface.cmd(Cmd::DISPLAY_ON)?;
    Ok(())
}

/// Send every byte of `framebuffer` that differs from `snapshot`, page-major.
/// A page address is only sent for pages that contain a change.
fn flush_changes<DI: Interface>(
    interface: &mut DI,
    framebuffer: &Framebuffer,
    snapshot: &Framebuffer,
) -> Result<usize, Error> {
    if framebuffer == snapshot {
        return Ok(0);
    }

    interface.cmd(Cmd::DISPLAY_OFF)?;
    let mut sent = 0;
    for page in 0..PAGES {
        let mut page_selected = false;
        let changes = framebuffer
            .page(page)
            .iter()
            .zip(snapshot.page(page))
            .enumerate()
            .filter(|(_, (new, old))| new != old);
        for (column, (&byte, _)) in changes {
            if !page_selected {
                interface.cmd(cmd::page_address(page as u8))?;
                page_selected = true;
            }
            let column = column as u8;
            interface.cmds(&[cmd::column_msb(column), cmd::column_lsb(column)])?;
            interface.data(&[byte])?;
            sent += 1;
        }
    }
    interface.cmd(Cmd::DISPLAY_ON)?;
    Ok(sent)
}
