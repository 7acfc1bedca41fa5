//! Test doubles shared by the integration tests

#![allow(dead_code)]

use deckstat_display::{Canvas, DisplayError, TextSize, TextStyle};
use deckstat_hal::PressEdge;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Fill(Rectangle, Rgb565),
    Outline(Rectangle, Rgb565),
    HLine(Point, u32, Rgb565),
    Text(String, Point, TextStyle),
    Flush,
}

/// 320x240 canvas that records every call
#[derive(Default)]
pub struct RecordingCanvas {
    pub ops: Vec<Op>,
    /// Make every fill fail
    pub fail_fills: bool,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<Op> {
        std::mem::take(&mut self.ops)
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(text, _, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|text| *text == needle)
    }

    pub fn text_at(&self, needle: &str) -> Option<Point> {
        self.ops.iter().find_map(|op| match op {
            Op::Text(text, origin, _) if text == needle => Some(*origin),
            _ => None,
        })
    }

    pub fn cleared_screen(&self) -> bool {
        self.ops.iter().any(|op| {
            matches!(op, Op::Fill(area, _) if area.top_left == Point::zero() && area.size == Size::new(320, 240))
        })
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Size {
        Size::new(320, 240)
    }

    fn glyph_size(&self, size: TextSize) -> Size {
        match size {
            TextSize::Small => Size::new(6, 10),
            TextSize::Large => Size::new(9, 15),
        }
    }

    fn fill_rect(&mut self, area: Rectangle, color: Rgb565) -> Result<(), DisplayError> {
        if self.fail_fills {
            return Err(DisplayError::Communication);
        }
        self.ops.push(Op::Fill(area, color));
        Ok(())
    }

    fn draw_rect(&mut self, area: Rectangle, color: Rgb565) -> Result<(), DisplayError> {
        self.ops.push(Op::Outline(area, color));
        Ok(())
    }

    fn draw_hline(&mut self, start: Point, width: u32, color: Rgb565) -> Result<(), DisplayError> {
        self.ops.push(Op::HLine(start, width, color));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: TextStyle) -> Result<(), DisplayError> {
        self.ops.push(Op::Text(text.to_string(), origin, style));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.ops.push(Op::Flush);
        Ok(())
    }
}

/// Button whose edge is set by the test
#[derive(Debug, Default)]
pub struct FakeButton {
    pub pending: bool,
    pub serviced: u32,
}

impl PressEdge for FakeButton {
    fn service(&mut self, _now_ms: u32) {
        self.serviced += 1;
    }

    fn was_pressed(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

pub fn buttons() -> [FakeButton; 3] {
    Default::default()
}

pub fn press(buttons: &mut [FakeButton; 3], index: usize) {
    buttons[index].pending = true;
}
