//! ILI9341 TFT driver
//!
//! Driver for 240x320 ILI9341 panels over a write-only SPI bus, run in
//! landscape (320x240) with 16-bit RGB565 pixels. The controller keeps its
//! own frame memory, so every draw goes straight to the panel and there is
//! nothing to flush.

use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Landscape dimensions
const WIDTH: u16 = 320;
const HEIGHT: u16 = 240;

/// Pixels pushed per SPI write
const CHUNK_PIXELS: usize = 64;

/// ILI9341 commands
#[allow(dead_code)]
mod cmd {
    pub const SOFT_RESET: u8 = 0x01;
    pub const SLEEP_OUT: u8 = 0x11;
    pub const DISPLAY_OFF: u8 = 0x28;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const COLUMN_ADDR: u8 = 0x2A;
    pub const PAGE_ADDR: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;
    pub const MEMORY_ACCESS: u8 = 0x36;
    pub const PIXEL_FORMAT: u8 = 0x3A;
    pub const FRAME_RATE: u8 = 0xB1;
    pub const DISPLAY_FUNCTION: u8 = 0xB6;
    pub const POWER_1: u8 = 0xC0;
    pub const POWER_2: u8 = 0xC1;
    pub const VCOM_1: u8 = 0xC5;
    pub const VCOM_2: u8 = 0xC7;
}

/// Row/column exchange with BGR subpixel order: landscape
const MADCTL_LANDSCAPE: u8 = 0x28;

/// 16 bits per pixel
const COLMOD_RGB565: u8 = 0x55;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// SPI transfer failed
    Spi,
    /// CS, DC or RST could not be driven
    Pin,
}

/// ILI9341 driver
pub struct Ili9341<SPI, CS, DC, RST> {
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: RST,
}

impl<SPI, CS, DC, RST> Ili9341<SPI, CS, DC, RST>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a driver; call [`Self::init`] before drawing
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST) -> Self {
        Self { spi, cs, dc, rst }
    }

    /// Reset the controller and bring it up in landscape RGB565
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.cs.set_high().map_err(|_| Error::Pin)?;
        self.rst.set_high().map_err(|_| Error::Pin)?;
        delay.delay_ms(5);
        self.rst.set_low().map_err(|_| Error::Pin)?;
        delay.delay_ms(20);
        self.rst.set_high().map_err(|_| Error::Pin)?;
        delay.delay_ms(150);

        self.command(cmd::SOFT_RESET, &[])?;
        delay.delay_ms(150);

        let init_cmds: &[(u8, &[u8])] = &[
            (cmd::DISPLAY_OFF, &[]),
            (cmd::POWER_1, &[0x23]),
            (cmd::POWER_2, &[0x10]),
            (cmd::VCOM_1, &[0x3E, 0x28]),
            (cmd::VCOM_2, &[0x86]),
            (cmd::MEMORY_ACCESS, &[MADCTL_LANDSCAPE]),
            (cmd::PIXEL_FORMAT, &[COLMOD_RGB565]),
            (cmd::FRAME_RATE, &[0x00, 0x18]),
            (cmd::DISPLAY_FUNCTION, &[0x08, 0x82, 0x27]),
        ];
        for (command, params) in init_cmds {
            self.command(*command, params)?;
        }

        self.command(cmd::SLEEP_OUT, &[])?;
        delay.delay_ms(120);
        self.command(cmd::DISPLAY_ON, &[])?;
        delay.delay_ms(20);
        Ok(())
    }

    /// Send a command byte followed by its parameters
    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), Error> {
        self.cs.set_low().map_err(|_| Error::Pin)?;
        let result = self.command_selected(command, params);
        self.cs.set_high().map_err(|_| Error::Pin)?;
        result
    }

    fn command_selected(&mut self, command: u8, params: &[u8]) -> Result<(), Error> {
        self.dc.set_low().map_err(|_| Error::Pin)?;
        self.spi.write(&[command]).map_err(|_| Error::Spi)?;
        self.spi.flush().map_err(|_| Error::Spi)?;
        if !params.is_empty() {
            self.dc.set_high().map_err(|_| Error::Pin)?;
            self.spi.write(params).map_err(|_| Error::Spi)?;
            self.spi.flush().map_err(|_| Error::Spi)?;
        }
        Ok(())
    }

    /// Select the inclusive pixel window for the next memory write
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Error> {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();
        self.command(cmd::COLUMN_ADDR, &[x0h, x0l, x1h, x1l])?;
        self.command(cmd::PAGE_ADDR, &[y0h, y0l, y1h, y1l])
    }

    /// Stream pixels into the current window
    fn write_pixels<I>(&mut self, pixels: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        self.cs.set_low().map_err(|_| Error::Pin)?;
        let result = self.write_pixels_selected(pixels);
        self.cs.set_high().map_err(|_| Error::Pin)?;
        result
    }

    fn write_pixels_selected<I>(&mut self, pixels: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        self.command_selected(cmd::MEMORY_WRITE, &[])?;
        self.dc.set_high().map_err(|_| Error::Pin)?;

        let mut buf = [0u8; CHUNK_PIXELS * 2];
        let mut len = 0;
        for color in pixels {
            let [hi, lo] = RawU16::from(color).into_inner().to_be_bytes();
            buf[len] = hi;
            buf[len + 1] = lo;
            len += 2;
            if len == buf.len() {
                self.spi.write(&buf).map_err(|_| Error::Spi)?;
                len = 0;
            }
        }
        if len > 0 {
            self.spi.write(&buf[..len]).map_err(|_| Error::Spi)?;
        }
        self.spi.flush().map_err(|_| Error::Spi)
    }

    /// Screen-clipped window for `area`, or `None` when nothing is visible
    fn window(&self, area: &Rectangle) -> Option<(u16, u16, u16, u16)> {
        let area = area.intersection(&self.bounding_box());
        let bottom_right = area.bottom_right()?;
        Some((
            area.top_left.x as u16,
            area.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
        ))
    }
}

impl<SPI, CS, DC, RST> OriginDimensions for Ili9341<SPI, CS, DC, RST> {
    fn size(&self) -> Size {
        Size::new(u32::from(WIDTH), u32::from(HEIGHT))
    }
}

impl<SPI, CS, DC, RST> DrawTarget for Ili9341<SPI, CS, DC, RST>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    type Color = Rgb565;
    type Error = Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if !(0..i32::from(WIDTH)).contains(&point.x) || !(0..i32::from(HEIGHT)).contains(&point.y) {
                continue;
            }
            let (x, y) = (point.x as u16, point.y as u16);
            self.set_window(x, y, x, y)?;
            self.write_pixels(core::iter::once(color))?;
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // Partly off-screen areas need per-pixel clipping
        if area.intersection(&self.bounding_box()) != *area {
            return self.draw_iter(
                area.points()
                    .zip(colors)
                    .map(|(point, color)| Pixel(point, color)),
            );
        }
        let Some((x0, y0, x1, y1)) = self.window(area) else {
            return Ok(());
        };
        self.set_window(x0, y0, x1, y1)?;
        self.write_pixels(colors.into_iter().take(area.size.width as usize * area.size.height as usize))
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let Some((x0, y0, x1, y1)) = self.window(area) else {
            return Ok(());
        };
        let count = (usize::from(x1 - x0) + 1) * (usize::from(y1 - y0) + 1);
        self.set_window(x0, y0, x1, y1)?;
        self.write_pixels(core::iter::repeat(color).take(count))
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_solid(&self.bounding_box(), color)
    }
}
