use tower_lsp::lsp_types::{Position, Range};

use super::*;
use crate::symbols::{ClassKind, ClassSymbol};

fn class(name: &str, start: u32, end: u32) -> ClassSymbol {
    ClassSymbol {
        name: name.to_string(),
        kind: ClassKind::Class,
        range: Range::new(Position::new(start, 0), Position::new(end, 2)),
        children: Vec::new(),
    }
}

fn lines(start: u32, end: u32) -> Range {
    Range::new(Position::new(start, 4), Position::new(end, 10))
}

#[test]
fn innermost_class_wins_regardless_of_order() {
    let outer = class("Outer", 0, 30);
    let inner = class("Inner", 10, 20);

    let outer_first = [outer.clone(), inner.clone()];
    assert_eq!(locate_class(&outer_first, lines(12, 12)).unwrap().name, "Inner");

    let inner_first = [inner, outer];
    assert_eq!(locate_class(&inner_first, lines(12, 12)).unwrap().name, "Inner");
}

#[test]
fn outer_class_when_target_outside_nested() {
    let classes = [class("Outer", 0, 30), class("Inner", 10, 20)];
    assert_eq!(locate_class(&classes, lines(25, 25)).unwrap().name, "Outer");
    assert_eq!(locate_class(&classes, lines(5, 15)).unwrap().name, "Outer");
}

#[test]
fn ties_keep_first_found() {
    let classes = [class("First", 3, 9), class("Second", 3, 12)];
    assert_eq!(locate_class(&classes, lines(4, 4)).unwrap().name, "First");
}

#[test]
fn none_when_nothing_contains_target() {
    let classes = [class("Widget", 10, 20)];
    assert!(locate_class(&classes, lines(2, 2)).is_none());
    assert!(locate_class(&classes, lines(18, 22)).is_none());
    assert!(locate_class(&[], lines(0, 0)).is_none());
}

#[test]
fn boundary_lines_are_inside() {
    let classes = [class("Widget", 10, 20)];
    assert!(locate_class(&classes, lines(10, 10)).is_some());
    assert!(locate_class(&classes, lines(20, 20)).is_some());
}

#[test]
fn locate_at_position() {
    let classes = [class("Outer", 0, 30), class("Inner", 10, 20)];
    assert_eq!(locate_class_at(&classes, Position::new(11, 0)).unwrap().name, "Inner");
    assert!(locate_class_at(&classes, Position::new(31, 0)).is_none());
}
