//! Drawing capability
//!
//! Renderers only need a handful of primitives on a landscape pixel space.
//! Keeping them behind a trait lets the panel logic run against a recording
//! canvas in tests and against the real panel on the board.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
}

/// Built-in font sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextSize {
    /// Rain cells and dense text
    Small,
    /// Labels, values and art
    Large,
}

/// Text color, optional background and size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub color: Rgb565,
    /// Cell background; `None` leaves the background untouched
    pub background: Option<Rgb565>,
    pub size: TextSize,
}

impl TextStyle {
    pub const fn new(color: Rgb565, size: TextSize) -> Self {
        Self {
            color,
            background: None,
            size,
        }
    }

    pub const fn on(self, background: Rgb565) -> Self {
        Self {
            background: Some(background),
            ..self
        }
    }
}

/// Pixel drawing surface
///
/// Text origins are the top-left corner of the first glyph cell.
pub trait Canvas {
    /// Drawable area in pixels
    fn size(&self) -> Size;

    /// Size of one glyph cell for `size`
    fn glyph_size(&self, size: TextSize) -> Size;

    /// Fill a rectangle
    fn fill_rect(&mut self, area: Rectangle, color: Rgb565) -> Result<(), DisplayError>;

    /// Draw a one pixel rectangle outline
    fn draw_rect(&mut self, area: Rectangle, color: Rgb565) -> Result<(), DisplayError>;

    /// Draw a horizontal line `width` pixels long starting at `start`
    fn draw_hline(&mut self, start: Point, width: u32, color: Rgb565) -> Result<(), DisplayError>;

    /// Draw text
    fn draw_text(&mut self, text: &str, origin: Point, style: TextStyle) -> Result<(), DisplayError>;

    /// Draw a single character
    fn draw_char(&mut self, c: char, origin: Point, style: TextStyle) -> Result<(), DisplayError> {
        let mut buf = [0u8; 4];
        self.draw_text(c.encode_utf8(&mut buf), origin, style)
    }

    /// Fill the whole surface
    fn clear(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        let area = Rectangle::new(Point::zero(), self.size());
        self.fill_rect(area, color)
    }

    /// Push buffered content to the hardware
    ///
    /// Unbuffered surfaces draw immediately and need not override this.
    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Width of `text` in pixels
    fn text_width(&self, text: &str, size: TextSize) -> u32 {
        text.chars().count() as u32 * self.glyph_size(size).width
    }
}
