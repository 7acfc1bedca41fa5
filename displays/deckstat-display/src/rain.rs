//! Matrix rain renderer

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use deckstat_core::matrix::{ColumnFrame, MatrixRain, RainStep, RAIN_CELL_HEIGHT, RAIN_CELL_WIDTH};

use crate::backend::{Canvas, DisplayError, TextSize, TextStyle};
use crate::palette;

const HEAD_STYLE: TextStyle = TextStyle::new(palette::RAIN_HEAD, TextSize::Small).on(palette::BLACK);
const TRAIL_STYLE: TextStyle = TextStyle::new(palette::RAIN_TRAIL, TextSize::Small).on(palette::BLACK);

/// Top-left pixel of a rain cell
fn cell_origin(column: u8, row: i16) -> Point {
    Point::new(
        i32::from(column) * RAIN_CELL_WIDTH as i32,
        i32::from(row) * RAIN_CELL_HEIGHT as i32,
    )
}

/// Owns the rain animation and paints each step
#[derive(Debug, Clone)]
pub struct MatrixRainRenderer {
    rain: MatrixRain,
}

impl MatrixRainRenderer {
    pub fn new(seed: u32) -> Self {
        Self {
            rain: MatrixRain::new(seed),
        }
    }

    /// Reseed every column on the next step
    pub fn invalidate(&mut self) {
        self.rain.invalidate();
    }

    pub fn state(&self) -> &MatrixRain {
        &self.rain
    }

    /// Advance one step and paint it
    pub fn render<C: Canvas>(&mut self, canvas: &mut C) -> Result<(), DisplayError> {
        let step = self.rain.step();
        draw_step(canvas, &step)
    }
}

/// Paint one animation step; clears the screen first after a reseed
pub fn draw_step<C: Canvas>(canvas: &mut C, step: &RainStep) -> Result<(), DisplayError> {
    if step.reseeded {
        canvas.clear(palette::BLACK)?;
    }
    for frame in &step.frames {
        draw_column(canvas, frame)?;
    }
    Ok(())
}

fn draw_column<C: Canvas>(canvas: &mut C, frame: &ColumnFrame) -> Result<(), DisplayError> {
    if let Some(row) = frame.erase_row {
        let cell = Rectangle::new(
            cell_origin(frame.column, row),
            Size::new(RAIN_CELL_WIDTH, RAIN_CELL_HEIGHT),
        );
        canvas.fill_rect(cell, palette::BLACK)?;
    }
    if let Some((row, glyph)) = frame.mid {
        canvas.draw_char(glyph, cell_origin(frame.column, row), TRAIL_STYLE)?;
    }
    if let Some((row, glyph)) = frame.head {
        canvas.draw_char(glyph, cell_origin(frame.column, row), HEAD_STYLE)?;
    }
    Ok(())
}
