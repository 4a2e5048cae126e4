use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp::lsp_types::{Position, Range, TextEdit};

use crate::text_pos::{end_position, line_of_byte_offset};

/// Guard pattern used when none is configured. `{FILE}` is the upper-cased stem.
pub const DEFAULT_GUARD_PATTERN: &str = "{FILE}_H";
const FILE_PLACEHOLDER: &str = "{FILE}";

static IFNDEF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#ifndef\s+(\S+)[ \t]*\r?$").unwrap());
static DEFINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#define\s+(\S+)[ \t]*\r?$").unwrap());
static ENDIF_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#endif\s+/\*\s+(\S+)\s*\*/[ \t]*\r?$").unwrap());
static ENDIF_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#endif\s+//\s+(\S+)[ \t]*\r?$").unwrap());
static ENDIF_BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#endif[ \t]*\r?$").unwrap());

/// Guard macro for `file_name` (a bare name or a path in either separator style).
pub fn header_guard_name(
    file_name: &str,
    pattern: &str,
) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let stem = match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    };
    let macro_name: String = stem
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    pattern.replacen(FILE_PLACEHOLDER, &macro_name, 1)
}

/// Edits wrapping `text` in `#ifndef`/`#define`/`#endif` for `guard`.
pub fn create_header_guard(
    text: &str,
    guard: &str,
) -> Vec<TextEdit> {
    let start = Position::new(0, 0);
    let end = end_position(text);
    vec![
        TextEdit::new(Range::new(start, start), format!("#ifndef {guard}\n#define {guard}\n\n")),
        TextEdit::new(Range::new(end, end), format!("\n#endif // {guard}")),
    ]
}

/// Lines of the existing `#ifndef`, `#define` and closing `#endif`.
///
/// The closing directive is the first `#endif /* X */`, else the first
/// `#endif // X`, else the last bare `#endif`. Macro names must agree and the
/// three lines must appear in order.
pub fn find_header_guard_lines(text: &str) -> Option<[u32; 3]> {
    let ifndef = IFNDEF.captures(text)?;
    let define = DEFINE.captures(text)?;
    let (endif_offset, endif_macro) = if let Some(caps) = ENDIF_BLOCK.captures(text) {
        (caps.get(0)?.start(), caps.get(1).map(|m| m.as_str()))
    } else if let Some(caps) = ENDIF_LINE.captures(text) {
        (caps.get(0)?.start(), caps.get(1).map(|m| m.as_str()))
    } else {
        (ENDIF_BARE.find_iter(text).last()?.start(), None)
    };

    let guard = ifndef.get(1)?.as_str();
    if define.get(1)?.as_str() != guard {
        return None;
    }
    if endif_macro.is_some_and(|name| name != guard) {
        return None;
    }

    let ifndef_offset = ifndef.get(0)?.start();
    let define_offset = define.get(0)?.start();
    if ifndef_offset > define_offset || define_offset > endif_offset {
        return None;
    }

    Some([
        line_of_byte_offset(text, ifndef_offset),
        line_of_byte_offset(text, define_offset),
        line_of_byte_offset(text, endif_offset),
    ])
}

/// Rewrite an existing guard to `guard`, or create one when none is found.
pub fn amend_header_guard(
    text: &str,
    guard: &str,
) -> Vec<TextEdit> {
    let Some(lines) = find_header_guard_lines(text) else {
        return create_header_guard(text, guard);
    };
    let directives = [
        format!("#ifndef {guard}"),
        format!("#define {guard}"),
        format!("#endif // {guard}"),
    ];
    let source_lines: Vec<&str> = text.split('\n').collect();
    lines
        .into_iter()
        .zip(directives)
        .map(|(line, directive)| {
            let content = source_lines.get(line as usize).copied().unwrap_or_default().trim_end_matches('\r');
            let end = Position::new(line, content.encode_utf16().count() as u32);
            TextEdit::new(Range::new(Position::new(line, 0), end), directive)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src/generate/header_guard_tests.rs"]
mod tests;
