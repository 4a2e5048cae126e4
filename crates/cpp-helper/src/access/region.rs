use once_cell::sync::Lazy;
use regex::Regex;
use tower_lsp::lsp_types::{Position, Range};
use tracing::debug;

use crate::symbols::ClassSymbol;
use crate::text_pos::line_from_column;

// Specifiers must sit at the class column; indented ones belong to nested classes.
static PUBLIC_SPECIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^public(\s+slots)?:").unwrap());
static ANY_SPECIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(public|private|protected)(\s+slots)?:").unwrap());

/// Default member indentation relative to the class keyword.
const INDENT_WIDTH: usize = 4;

/// Lines governed by the first `public:` specifier of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicRegion {
    /// Closed by a later access specifier. The range ends on the line before it.
    Bounded { range: Range, indent: String },
    /// Runs to the class's last line.
    Open { range: Range, indent: String },
    /// The class has no `public:` section.
    Missing { indent: String },
}

impl PublicRegion {
    pub fn range(&self) -> Option<Range> {
        match self {
            Self::Bounded { range, .. } | Self::Open { range, .. } => Some(*range),
            Self::Missing { .. } => None,
        }
    }

    /// Whitespace new members should be prefixed with.
    pub fn indent(&self) -> &str {
        match self {
            Self::Bounded { indent, .. } | Self::Open { indent, .. } | Self::Missing { indent } => indent,
        }
    }

    /// Where new declarations go: after the last line of a bounded region, or
    /// before the class's last line for an open one. `fallback` is used when there is
    /// no public section at all.
    pub fn insertion_point(
        &self,
        fallback: Position,
    ) -> Position {
        match self {
            Self::Bounded { range, .. } => Position::new(range.end.line + 1, 0),
            Self::Open { range, .. } => Position::new(range.end.line, 0),
            Self::Missing { .. } => fallback,
        }
    }
}

/// Insertion point for a class without a public section: the start of the line
/// after the opening brace. A class whose body closes on the brace line gets
/// the column right after `{`.
pub fn class_body_start(
    class: &ClassSymbol,
    class_text: &str,
) -> Position {
    let first_line = class.range.start.line;
    let lines: Vec<&str> = class_text.split('\n').collect();
    let Some((index, brace)) = lines.iter().enumerate().find_map(|(index, line)| Some((index, line.find('{')?)))
    else {
        return Position::new(first_line + 1, 0);
    };
    let line = first_line + index as u32;
    if lines[index + 1..].iter().any(|rest| !rest.trim().is_empty()) {
        return Position::new(line + 1, 0);
    }
    // The first slice line starts at the class column.
    let offset = if index == 0 { class.range.start.character } else { 0 };
    Position::new(line, offset + lines[index][..=brace].encode_utf16().count() as u32)
}

/// Scan `class_text` (the source covered by `class.range`) for its public
/// section. Specifiers are matched line by line after dropping the columns
/// left of the class keyword, so text inside string literals or comments that
/// looks like a specifier is also matched.
pub fn public_region(
    class: &ClassSymbol,
    class_text: &str,
) -> PublicRegion {
    let column = class.range.start.character as usize;
    let first_line = class.range.start.line;
    let lines: Vec<&str> = class_text.split('\n').map(|line| line.trim_end_matches('\r')).collect();
    let default_indent = " ".repeat(column + INDENT_WIDTH);

    let mut public_line = None;
    for (index, raw) in lines.iter().enumerate() {
        // The first slice line already starts at the class column.
        let line = if index == 0 { *raw } else { line_from_column(raw, class.range.start.character) };
        let line_number = first_line + index as u32;
        match public_line {
            None => {
                if PUBLIC_SPECIFIER.is_match(line) {
                    public_line = Some((index, line_number));
                }
            },
            Some((public_index, public_number)) => {
                if ANY_SPECIFIER.is_match(line) {
                    let body = &lines[public_index + 1..index];
                    let range = region_range(public_number, line_number);
                    return PublicRegion::Bounded {
                        range,
                        indent: member_indent(body).unwrap_or(default_indent),
                    };
                }
            },
        }
    }

    let Some((public_index, public_number)) = public_line else {
        debug!("[access] no public section in {}", class.name);
        return PublicRegion::Missing { indent: default_indent };
    };
    // Runs through the class's last line, which usually holds the closing brace.
    let last_line = (first_line + lines.len().saturating_sub(1) as u32).max(public_number + 1);
    let body_end = lines.len().saturating_sub(1).max(public_index + 1);
    PublicRegion::Open {
        range: Range::new(Position::new(public_number + 1, 0), Position::new(last_line, 0)),
        indent: member_indent(&lines[public_index + 1..body_end]).unwrap_or(default_indent),
    }
}

/// Lines strictly between the specifier line and `stop_line`. An empty
/// section collapses onto the specifier line.
fn region_range(
    specifier_line: u32,
    stop_line: u32,
) -> Range {
    if stop_line <= specifier_line + 1 {
        let at = Position::new(specifier_line, 0);
        return Range::new(at, at);
    }
    Range::new(Position::new(specifier_line + 1, 0), Position::new(stop_line - 1, 0))
}

fn member_indent(lines: &[&str]) -> Option<String> {
    let line = lines.iter().find(|line| !line.trim().is_empty())?;
    let width = line.len() - line.trim_start().len();
    Some(line[..width].to_string())
}

#[cfg(test)]
#[path = "../../tests/src/access/region_tests.rs"]
mod tests;
