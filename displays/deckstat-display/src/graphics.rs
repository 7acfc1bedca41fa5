//! `Canvas` adapter for embedded-graphics draw targets

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::backend::{Canvas, DisplayError, TextSize, TextStyle};

fn font(size: TextSize) -> &'static MonoFont<'static> {
    match size {
        TextSize::Small => &FONT_6X10,
        TextSize::Large => &FONT_9X15,
    }
}

/// Drawing surface over any Rgb565 `DrawTarget`
pub struct GraphicsCanvas<D> {
    target: D,
}

impl<D> GraphicsCanvas<D> {
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn inner(&self) -> &D {
        &self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }
}

impl<D> Canvas for GraphicsCanvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn size(&self) -> Size {
        self.target.bounding_box().size
    }

    fn glyph_size(&self, size: TextSize) -> Size {
        let font = font(size);
        font.character_size + Size::new(font.character_spacing, 0)
    }

    fn fill_rect(&mut self, area: Rectangle, color: Rgb565) -> Result<(), DisplayError> {
        self.target
            .fill_solid(&area, color)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_rect(&mut self, area: Rectangle, color: Rgb565) -> Result<(), DisplayError> {
        area.into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target)
            .map_err(|_| DisplayError::Communication)
    }

    fn draw_hline(&mut self, start: Point, width: u32, color: Rgb565) -> Result<(), DisplayError> {
        self.fill_rect(Rectangle::new(start, Size::new(width, 1)), color)
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: TextStyle) -> Result<(), DisplayError> {
        let mut builder = MonoTextStyleBuilder::new()
            .font(font(style.size))
            .text_color(style.color);
        if let Some(background) = style.background {
            builder = builder.background_color(background);
        }

        Text::with_baseline(text, origin, builder.build(), Baseline::Top)
            .draw(&mut self.target)
            .map(|_| ())
            .map_err(|_| DisplayError::Communication)
    }
}
