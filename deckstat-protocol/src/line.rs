//! Line assembly for the telemetry stream
//!
//! Bytes arrive in arbitrary chunks. [`LineAssembler`] accumulates them until
//! a `\n` and hands out the trimmed line. The buffer is bounded: a line that
//! grows past [`MAX_LINE_LEN`] bytes is dropped as a whole, including
//! whatever arrives after the overflow up to its terminator.

use heapless::Vec;

/// Maximum accepted line length in bytes (excluding the terminator)
pub const MAX_LINE_LEN: usize = 512;

/// Line terminator
const LF: u8 = b'\n';

/// Ignored carriage return
const CR: u8 = b'\r';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssembleState {
    /// Accumulating bytes of the current line
    Collecting,
    /// Current line overflowed; dropping bytes until the next terminator
    Discarding,
    /// A line was handed out and is still borrowed from the buffer
    Emitted,
}

/// Incremental byte-to-line assembler
#[derive(Debug, Clone)]
pub struct LineAssembler {
    state: AssembleState,
    buffer: Vec<u8, MAX_LINE_LEN>,
    overflows: u32,
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl LineAssembler {
    /// Create an empty assembler
    pub const fn new() -> Self {
        Self {
            state: AssembleState::Collecting,
            buffer: Vec::new(),
            overflows: 0,
        }
    }

    /// Drop any partial line
    pub fn reset(&mut self) {
        self.state = AssembleState::Collecting;
        self.buffer.clear();
    }

    /// Number of bytes held for the line in progress
    pub fn len(&self) -> usize {
        match self.state {
            AssembleState::Emitted => 0,
            _ => self.buffer.len(),
        }
    }

    /// True when no partial line is held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of lines dropped for exceeding [`MAX_LINE_LEN`]
    pub fn overflow_count(&self) -> u32 {
        self.overflows
    }

    /// Feed a single byte
    ///
    /// Returns the completed line when `byte` terminates a non-empty line.
    /// The line is trimmed of surrounding whitespace and borrows the
    /// internal buffer, so it must be consumed before the next call.
    ///
    /// Bytes that are not valid UTF-8 cut the line short at the last valid
    /// character.
    pub fn feed(&mut self, byte: u8) -> Option<&str> {
        if self.state == AssembleState::Emitted {
            self.buffer.clear();
            self.state = AssembleState::Collecting;
        }

        match byte {
            CR => None,
            LF => self.terminate(),
            _ => {
                self.push(byte);
                None
            }
        }
    }

    /// Feed every byte of `bytes`, calling `on_line` for each completed line
    ///
    /// Returns the number of lines completed.
    pub fn feed_bytes(&mut self, bytes: &[u8], mut on_line: impl FnMut(&str)) -> usize {
        let mut lines = 0;
        for &byte in bytes {
            if let Some(line) = self.feed(byte) {
                on_line(line);
                lines += 1;
            }
        }
        lines
    }

    fn push(&mut self, byte: u8) {
        if self.state == AssembleState::Discarding {
            return;
        }

        if self.buffer.push(byte).is_err() {
            self.buffer.clear();
            self.state = AssembleState::Discarding;
            self.overflows = self.overflows.wrapping_add(1);
        }
    }

    fn terminate(&mut self) -> Option<&str> {
        if self.state == AssembleState::Discarding {
            self.state = AssembleState::Collecting;
            return None;
        }

        let (start, end) = line_bounds(&self.buffer);
        if start == end {
            self.buffer.clear();
            return None;
        }

        self.state = AssembleState::Emitted;
        core::str::from_utf8(&self.buffer[start..end]).ok()
    }
}

/// Byte range of the trimmed, valid-UTF-8 part of a raw line
fn line_bounds(bytes: &[u8]) -> (usize, usize) {
    let text = match core::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    };

    let start = text.len() - text.trim_start().len();
    let end = text.trim_end().len().max(start);
    (start, end)
}
