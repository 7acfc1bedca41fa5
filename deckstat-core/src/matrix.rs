//! Matrix rain animation state
//!
//! The screen is a grid of character cells. Every column carries one falling
//! drop: a bright head, a dim character just behind it, and a trail of
//! characters left on screen that is erased `trail` rows behind the head.
//! Columns respawn independently once the whole drop has left the screen,
//! which keeps them staggered.
//!
//! This module only tracks positions. A step returns the cell operations for
//! each column and the display crate paints them.

use heapless::Vec;

use crate::rng::XorShift32;

/// Number of character columns
pub const RAIN_COLUMNS: usize = 40;

/// Number of visible character rows
pub const RAIN_ROWS: i16 = 24;

/// Cell width in pixels
pub const RAIN_CELL_WIDTH: u32 = 8;

/// Cell height in pixels
pub const RAIN_CELL_HEIGHT: u32 = 10;

/// Shortest trail, in rows
pub const TRAIL_MIN: u8 = 4;

/// Longest trail, in rows
pub const TRAIL_MAX: u8 = 14;

/// First printable glyph
const GLYPH_FIRST: u8 = b'!';

/// Last printable glyph
const GLYPH_LAST: u8 = b'~';

/// State of one column's drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RainColumn {
    /// Row of the head; negative while staged above the screen
    pub head: i16,
    /// Rows between the head and the cell that gets erased
    pub trail: u8,
}

impl RainColumn {
    const OFFSCREEN: Self = Self { head: 0, trail: TRAIL_MIN };

    /// Whole drop, trail included, is below the last row
    fn finished(&self) -> bool {
        self.head - i16::from(self.trail) >= RAIN_ROWS
    }
}

/// Cell operations for one column in one step
///
/// Rows are always within `0..RAIN_ROWS`; operations for rows off screen
/// are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColumnFrame {
    pub column: u8,
    /// Row to blank
    pub erase_row: Option<i16>,
    /// Dim character one row behind the head
    pub mid: Option<(i16, char)>,
    /// Bright head character
    pub head: Option<(i16, char)>,
}

/// Result of one animation step
#[derive(Debug, Clone)]
pub struct RainStep {
    /// All columns were reseeded; the screen must be cleared first
    pub reseeded: bool,
    pub frames: Vec<ColumnFrame, RAIN_COLUMNS>,
}

/// Animation state for every column
#[derive(Debug, Clone)]
pub struct MatrixRain {
    columns: [RainColumn; RAIN_COLUMNS],
    needs_seed: bool,
    rng: XorShift32,
}

impl MatrixRain {
    /// Create the animation; columns are seeded on the first step
    pub fn new(seed: u32) -> Self {
        Self {
            columns: [RainColumn::OFFSCREEN; RAIN_COLUMNS],
            needs_seed: true,
            rng: XorShift32::new(seed),
        }
    }

    /// Request a full reseed on the next step
    pub fn invalidate(&mut self) {
        self.needs_seed = true;
    }

    pub fn needs_seed(&self) -> bool {
        self.needs_seed
    }

    pub fn columns(&self) -> &[RainColumn] {
        &self.columns
    }

    /// Advance every column by one row
    pub fn step(&mut self) -> RainStep {
        let reseeded = core::mem::take(&mut self.needs_seed);
        if reseeded {
            for i in 0..RAIN_COLUMNS {
                self.columns[i] = self.spawn();
            }
        }

        let mut frames = Vec::new();
        for i in 0..RAIN_COLUMNS {
            let column = self.columns[i];
            let frame = ColumnFrame {
                column: i as u8,
                erase_row: visible(column.head - i16::from(column.trail)),
                mid: visible(column.head - 1).map(|row| (row, self.glyph())),
                head: visible(column.head).map(|row| (row, self.glyph())),
            };
            // Capacity is RAIN_COLUMNS
            let _ = frames.push(frame);

            let mut next = RainColumn {
                head: column.head + 1,
                ..column
            };
            if next.finished() {
                next = self.spawn();
            }
            self.columns[i] = next;
        }

        RainStep { reseeded, frames }
    }

    fn spawn(&mut self) -> RainColumn {
        let head = -(1 + self.rng.below(RAIN_ROWS as u32) as i16);
        let trail = self
            .rng
            .range_inclusive(u32::from(TRAIL_MIN), u32::from(TRAIL_MAX)) as u8;
        RainColumn { head, trail }
    }

    fn glyph(&mut self) -> char {
        let span = u32::from(GLYPH_LAST - GLYPH_FIRST) + 1;
        char::from(GLYPH_FIRST + self.rng.below(span) as u8)
    }
}

fn visible(row: i16) -> Option<i16> {
    (0..RAIN_ROWS).contains(&row).then_some(row)
}
