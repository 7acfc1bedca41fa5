//! ASCII art gallery
//!
//! A fixed, ordered catalog of artworks and a cursor into it. The cursor
//! starts at the first piece whenever the gallery is opened and wraps
//! around on every further selection.

/// One multi-line artwork
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Artwork {
    pub name: &'static str,
    pub lines: &'static [&'static str],
}

impl Artwork {
    /// Width of the widest line, in characters
    pub fn width(&self) -> usize {
        self.lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Number of lines
    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

/// Built-in gallery, in presentation order
pub static CATALOG: [Artwork; 5] = [
    Artwork {
        name: "skull",
        lines: &[
            "     .-''''-.     ",
            "    /        \\    ",
            "   |  O    O  |   ",
            "   |    /\\    |   ",
            "    \\  ====  /    ",
            "     '-.__.-'     ",
            "      |||||       ",
        ],
    },
    Artwork {
        name: "cat",
        lines: &[
            " /\\_/\\  ",
            "( o.o ) ",
            " > ^ <  ",
            "/     \\ ",
            "(_| |_) ",
        ],
    },
    Artwork {
        name: "rocket",
        lines: &[
            "    /\\    ",
            "   /  \\   ",
            "  | () |  ",
            "  |    |  ",
            " /| || |\\ ",
            "/_|_||_|_\\",
            "   /||\\   ",
            "  ' '' '  ",
        ],
    },
    Artwork {
        name: "terminal",
        lines: &[
            "+----------------+",
            "| $ uptime       |",
            "| up 42 days     |",
            "| $ _            |",
            "+----------------+",
            "    ___|  |___   ",
            "   [__________]  ",
        ],
    },
    Artwork {
        name: "coffee",
        lines: &[
            "   ( (    ",
            "    ) )   ",
            " ........ ",
            " |      |]",
            " \\      / ",
            "  `----'  ",
        ],
    },
];

/// Selection cursor into a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArtCursor {
    index: usize,
    len: usize,
}

impl ArtCursor {
    /// Cursor over a catalog of `len` pieces
    pub const fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Back to the first piece
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Move to the next piece, wrapping to the first
    pub fn advance(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl Default for ArtCursor {
    fn default() -> Self {
        Self::new(CATALOG.len())
    }
}
