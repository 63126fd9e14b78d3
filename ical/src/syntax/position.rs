// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Source locations: byte spans and human readable line/column positions.

use std::fmt::{self, Display};
use std::ops::Range;

use crate::syntax::lexer::BYTE_ORDER_MARK;

/// Byte range of a token or lexeme in the source text
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start position of the span
    pub start: usize,
    /// End position of the span
    pub end: usize,
}

impl Span {
    /// Create a new span from start and end positions
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Convert to a standard range
    #[must_use]
    pub const fn into_range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

/// Location of a token in the source text.
///
/// Lines and columns are 1-based and refer to physical lines, so a token on
/// a folded continuation line reports the continuation line. Columns count
/// characters, not bytes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Physical line, starting at 1
    pub line: usize,
    /// Character column, starting at 1
    pub column: usize,
    /// Byte offset into the source
    pub offset: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Maps byte offsets to [`Position`]s.
///
/// CR, LF and CRLF all terminate a physical line. A leading byte order mark
/// does not count towards the first line's columns.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Index the line starts of `src`
    #[must_use]
    pub fn new(src: &str) -> Self {
        let bytes = src.as_bytes();
        let first = if src.starts_with(BYTE_ORDER_MARK) {
            BYTE_ORDER_MARK.len_utf8()
        } else {
            0
        };
        let mut line_starts = vec![first];
        let mut iter = bytes.iter().enumerate().peekable();
        while let Some((i, &b)) = iter.next() {
            match b {
                b'\r' => {
                    if let Some(&(_, b'\n')) = iter.peek() {
                        iter.next();
                        line_starts.push(i + 2);
                    } else {
                        line_starts.push(i + 1);
                    }
                }
                b'\n' => line_starts.push(i + 1),
                _ => {}
            }
        }
        Self { line_starts }
    }

    /// Resolve a byte offset in `src` to a position
    #[must_use]
    pub fn position(&self, src: &str, offset: usize) -> Position {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = line
            .checked_sub(1)
            .and_then(|i| self.line_starts.get(i))
            .copied()
            .unwrap_or(0);
        let column = src.get(line_start..offset).map_or(0, |s| s.chars().count()) + 1;
        Position {
            line: line.max(1),
            column,
            offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_positions_across_line_terminators() {
        let src = "AB\r\nCD\nEF\rGH";
        let index = LineIndex::new(src);

        #[rustfmt::skip]
        let cases = [
            ( 0, (1, 1)),
            ( 1, (1, 2)),
            ( 4, (2, 1)),
            ( 7, (3, 1)),
            ( 8, (3, 2)),
            (10, (4, 1)),
            (11, (4, 2)),
        ];
        for (offset, (line, column)) in cases {
            let pos = index.position(src, offset);
            assert_eq!((pos.line, pos.column), (line, column), "offset {offset}");
            assert_eq!(pos.offset, offset);
        }
    }

    #[test]
    fn counts_columns_in_characters() {
        let src = "SUMMARY:caf\u{e9}!";
        let index = LineIndex::new(src);
        let offset = src.find('!').unwrap();
        assert_eq!(index.position(src, offset).column, 13);
    }

    #[test]
    fn skips_byte_order_mark_in_first_line_columns() {
        let src = "\u{feff}AB\r\nCD";
        let index = LineIndex::new(src);
        let pos = index.position(src, 3);
        assert_eq!((pos.line, pos.column, pos.offset), (1, 1, 3));
        let pos = index.position(src, 7);
        assert_eq!((pos.line, pos.column), (2, 1));
    }

    #[test]
    fn position_at_end_of_input() {
        let src = "A\r\n";
        let index = LineIndex::new(src);
        let pos = index.position(src, src.len());
        assert_eq!((pos.line, pos.column), (2, 1));
    }

    #[test]
    fn displays_line_and_column() {
        let pos = Position {
            line: 3,
            column: 7,
            offset: 42,
        };
        assert_eq!(pos.to_string(), "line 3, column 7");
    }
}
