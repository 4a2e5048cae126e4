use tower_lsp::lsp_types::{Position, Range};

use super::tree::ClassSymbol;

/// Innermost class whose line span contains `target`.
///
/// Among candidates the one starting closest above `target` wins; on a tie the
/// first in discovery order is kept.
pub fn locate_class<'a>(
    classes: &'a [ClassSymbol],
    target: Range,
) -> Option<&'a ClassSymbol> {
    let mut best: Option<(&ClassSymbol, u32)> = None;
    for class in classes {
        if !class.contains_lines(&target) {
            continue;
        }
        let distance = target.start.line - class.range.start.line;
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((class, distance));
        }
    }
    best.map(|(class, _)| class)
}

/// [`locate_class`] for a cursor position.
pub fn locate_class_at(
    classes: &[ClassSymbol],
    position: Position,
) -> Option<&ClassSymbol> {
    locate_class(classes, Range::new(position, position))
}

#[cfg(test)]
#[path = "../../tests/src/symbols/locate_tests.rs"]
mod tests;
