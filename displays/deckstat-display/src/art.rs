//! ASCII art renderer

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use deckstat_core::art::Artwork;

use crate::backend::{Canvas, DisplayError, TextSize, TextStyle};
use crate::palette;

/// Largest text size first
const SIZES: [TextSize; 2] = [TextSize::Large, TextSize::Small];

/// Pixel size of `art` drawn with `glyph` cells
fn block_size(art: &Artwork, glyph: Size) -> Size {
    Size::new(
        art.width() as u32 * glyph.width,
        art.height() as u32 * glyph.height,
    )
}

/// Draw `art` centered on the canvas, returning the area it covers
///
/// Uses the largest text size whose block fits. Lines share one left edge,
/// so leading spaces keep their indentation. Nothing is cleared.
pub fn draw_art<C: Canvas>(canvas: &mut C, art: &Artwork) -> Result<Rectangle, DisplayError> {
    let screen = canvas.size();
    let size = SIZES
        .into_iter()
        .find(|&size| {
            let block = block_size(art, canvas.glyph_size(size));
            block.width <= screen.width && block.height <= screen.height
        })
        .unwrap_or(TextSize::Small);

    let glyph = canvas.glyph_size(size);
    let block = block_size(art, glyph);
    let origin = Point::new(
        (screen.width as i32 - block.width as i32) / 2,
        (screen.height as i32 - block.height as i32) / 2,
    );

    let line_height = glyph.height as i32;
    let style = TextStyle::new(palette::GREEN, size);
    for (i, line) in art.lines.iter().enumerate() {
        canvas.draw_text(line, origin + Point::new(0, i as i32 * line_height), style)?;
    }

    Ok(Rectangle::new(origin, block))
}
