use tower_lsp::lsp_types::Position;

/// LSP position (UTF-16 column) of `byte_offset`, clamped to the end of `source`.
pub fn position_from_byte_offset(
    source: &str,
    byte_offset: usize,
) -> Position {
    let mut remaining = byte_offset.min(source.len());

    for (line_index, line) in source.split('\n').enumerate() {
        let line_len = line.len();
        if remaining <= line_len {
            let mut utf16_col = 0u32;
            let mut byte_count = 0usize;
            for ch in line.chars() {
                if byte_count >= remaining {
                    break;
                }
                utf16_col += ch.len_utf16() as u32;
                byte_count += ch.len_utf8();
            }
            return Position::new(line_index as u32, utf16_col);
        }
        remaining = remaining.saturating_sub(line_len + 1);
    }

    Position::new(0, 0)
}

/// 0-based line number containing `byte_offset`.
pub fn line_of_byte_offset(
    source: &str,
    byte_offset: usize,
) -> u32 {
    let end = byte_offset.min(source.len());
    source.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() as u32
}

/// Position just past the last character of `source`.
pub fn end_position(source: &str) -> Position {
    position_from_byte_offset(source, source.len())
}

/// Byte index inside `line` for a UTF-16 column, clamped to the line length.
pub fn byte_column_of_utf16(
    line: &str,
    column: u32,
) -> usize {
    let mut utf16_offset = 0u32;
    let mut char_offset = 0usize;
    for ch in line.chars() {
        if utf16_offset >= column {
            break;
        }
        utf16_offset += ch.len_utf16() as u32;
        char_offset += ch.len_utf8();
    }
    char_offset
}

/// The tail of `line` starting at UTF-16 `column` (empty when the line is shorter).
pub fn line_from_column(
    line: &str,
    column: u32,
) -> &str {
    &line[byte_column_of_utf16(line, column)..]
}

#[cfg(test)]
#[path = "../tests/src/text_pos_tests.rs"]
mod tests;
