//! Byte offsets ↔ LSP positions.
//!
//! The core crate speaks byte offsets; LSP speaks UTF-16 code units per line.
//! Both directions clamp out-of-range input instead of panicking.

use ropey::Rope;
use tower_lsp::lsp_types::{Position, Range};

/// Convert a byte offset into a line/UTF-16 column position.
pub fn offset_to_position(rope: &Rope, offset: usize) -> Position {
    let char_idx = rope.byte_to_char(offset.min(rope.len_bytes()));
    let line = rope.char_to_line(char_idx);
    let line_start = rope.line_to_char(line);
    let col = rope.char_to_utf16_cu(char_idx) - rope.char_to_utf16_cu(line_start);
    Position::new(line as u32, col as u32)
}

/// Convert a line/UTF-16 column position into a byte offset.
///
/// Lines past the end map to the end of the document; columns past the end
/// of a line map to the end of that line.
pub fn position_to_offset(rope: &Rope, pos: Position) -> usize {
    let line = pos.line as usize;
    if line >= rope.len_lines() {
        return rope.len_bytes();
    }
    let slice = rope.line(line);
    let content_cu = slice.len_utf16_cu() - line_break_len(&slice.to_string());
    let col = (pos.character as usize).min(content_cu);
    let char_idx = rope.line_to_char(line) + slice.utf16_cu_to_char(col);
    rope.char_to_byte(char_idx)
}

pub fn range_of(rope: &Rope, start: usize, end: usize) -> Range {
    Range::new(offset_to_position(rope, start), offset_to_position(rope, end))
}

fn line_break_len(line: &str) -> usize {
    if line.ends_with("\r\n") {
        2
    } else if line.ends_with('\n') || line.ends_with('\r') {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_roundtrip() {
        let rope = Rope::from_str("Group {\n  Label {}\n}");
        let pos = offset_to_position(&rope, 10);
        assert_eq!(pos, Position::new(1, 2));
        assert_eq!(position_to_offset(&rope, pos), 10);
    }

    #[test]
    fn utf16_columns_count_surrogate_pairs() {
        // "é" is one UTF-16 unit (two bytes), "𝄞" is two units (four bytes).
        let rope = Rope::from_str("é𝄞x");
        assert_eq!(offset_to_position(&rope, 2), Position::new(0, 1));
        assert_eq!(offset_to_position(&rope, 6), Position::new(0, 3));
        assert_eq!(position_to_offset(&rope, Position::new(0, 3)), 6);
    }

    #[test]
    fn out_of_range_is_clamped() {
        let rope = Rope::from_str("ab\ncd\n");
        assert_eq!(offset_to_position(&rope, 999), Position::new(2, 0));
        assert_eq!(position_to_offset(&rope, Position::new(0, 99)), 2);
        assert_eq!(position_to_offset(&rope, Position::new(9, 0)), 6);
    }

    #[test]
    fn crlf_line_end_is_not_addressable() {
        let rope = Rope::from_str("ab\r\ncd");
        assert_eq!(position_to_offset(&rope, Position::new(0, 5)), 2);
        assert_eq!(position_to_offset(&rope, Position::new(1, 1)), 5);
    }
}
