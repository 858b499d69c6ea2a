//! Byte-offset to line/column conversion.
//!
//! Parser output is addressed in UTF-8 byte offsets ([`TextSize`]). Editor
//! protocols address positions in UTF-16 code units, so [`LineIndex`]
//! carries enough information to produce both column flavors.

use text_size::{TextRange, TextSize};

/// A line/column position (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    /// Column in UTF-8 bytes from the line start.
    pub col: u32,
}

/// Maps byte offsets to line/column positions for one text snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the start of each line.
    newlines: Vec<TextSize>,
    /// Per line, the ranges of chars that occupy more than one UTF-16 unit
    /// or more than one byte. Lines absent from the map are pure ASCII.
    wide_chars: Vec<(u32, Vec<TextRange>)>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut newlines = vec![TextSize::new(0)];
        let mut wide_chars = Vec::new();
        let mut line_wide: Vec<TextRange> = Vec::new();
        let mut line: u32 = 0;

        for (offset, c) in text.char_indices() {
            let start = TextSize::new(offset as u32);
            if c == '\n' {
                newlines.push(start + TextSize::of(c));
                if !line_wide.is_empty() {
                    wide_chars.push((line, std::mem::take(&mut line_wide)));
                }
                line += 1;
            } else if c.len_utf8() > 1 {
                line_wide.push(TextRange::at(start, TextSize::of(c)));
            }
        }
        if !line_wide.is_empty() {
            wide_chars.push((line, line_wide));
        }

        Self { newlines, wide_chars }
    }

    /// Convert a byte offset to a line and UTF-8 byte column.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self.newlines.partition_point(|&start| start <= offset) - 1;
        let col = offset - self.newlines[line];
        LineCol { line: line as u32, col: col.into() }
    }

    /// Convert a byte offset to a line and UTF-16 code-unit column.
    pub fn line_col_utf16(&self, offset: TextSize) -> LineCol {
        let pos = self.line_col(offset);
        let mut col = pos.col;
        if let Ok(idx) = self.wide_chars.binary_search_by_key(&pos.line, |&(l, _)| l) {
            let line_start = self.newlines[pos.line as usize];
            for range in &self.wide_chars[idx].1 {
                if range.end() <= line_start + TextSize::new(pos.col) {
                    let len: u32 = range.len().into();
                    let utf16_len = if len == 4 { 2 } else { 1 };
                    col = col - len + utf16_len;
                }
            }
        }
        LineCol { line: pos.line, col }
    }

    /// Byte offset of the start of `line`, if it exists.
    pub fn line_start(&self, line: u32) -> Option<TextSize> {
        self.newlines.get(line as usize).copied()
    }

    /// Number of lines in the indexed text.
    pub fn line_count(&self) -> usize {
        self.newlines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_ascii() {
        let index = LineIndex::new("hello\nworld\n");
        assert_eq!(index.line_col(TextSize::new(0)), LineCol { line: 0, col: 0 });
        assert_eq!(index.line_col(TextSize::new(4)), LineCol { line: 0, col: 4 });
        assert_eq!(index.line_col(TextSize::new(6)), LineCol { line: 1, col: 0 });
        assert_eq!(index.line_col(TextSize::new(8)), LineCol { line: 1, col: 2 });
    }

    #[test]
    fn test_line_col_utf16() {
        // 'é' is 2 bytes in UTF-8 but 1 unit in UTF-16
        let index = LineIndex::new("é = 1;\n");
        let offset = TextSize::new(4); // after "é ="
        assert_eq!(index.line_col(offset), LineCol { line: 0, col: 4 });
        assert_eq!(index.line_col_utf16(offset), LineCol { line: 0, col: 3 });
    }

    #[test]
    fn test_line_count() {
        assert_eq!(LineIndex::new("").line_count(), 1);
        assert_eq!(LineIndex::new("a\nb").line_count(), 2);
    }
}
