//! Offset to row/column resolution.

use serde::{Deserialize, Serialize};

/// A resolved source position. All fields are 0-based; `col` and
/// `char_offset` count Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
    pub char_offset: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.row, self.col, self.char_offset)
    }
}

/// Line-start table over a source string. Built once, queried per diagnostic.
#[derive(Debug, Clone)]
pub struct LineIndex<'s> {
    source: &'s str,
    line_starts: Vec<usize>,
}

impl<'s> LineIndex<'s> {
    pub fn new(source: &'s str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            source,
            line_starts,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Offsets past the end clamp to end of input; offsets inside a multi-byte
    /// character snap back to its first byte.
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }

        let row = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[row];

        Position {
            row,
            col: self.source[line_start..offset].chars().count(),
            char_offset: self.source[..offset].chars().count(),
        }
    }

    /// Position one past the last character.
    pub fn end(&self) -> Position {
        self.position(self.source.len())
    }
}
