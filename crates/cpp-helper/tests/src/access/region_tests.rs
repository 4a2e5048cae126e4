use tower_lsp::lsp_types::{Position, Range};

use super::*;
use crate::symbols::{ClassKind, ClassSymbol};

fn class_at(line: u32, column: u32, text: &str) -> ClassSymbol {
    let last = line + text.lines().count() as u32 - 1;
    ClassSymbol {
        name: "C".to_string(),
        kind: ClassKind::Class,
        range: Range::new(Position::new(line, column), Position::new(last, 2)),
        children: Vec::new(),
    }
}

fn lines(start: u32, end: u32) -> Range {
    Range::new(Position::new(start, 0), Position::new(end, 0))
}

#[test]
fn bounded_region_spans_only_public_members() {
    let text = "class C {\npublic:\n  int a;\nprivate:\n  int b;\n};";
    let region = public_region(&class_at(0, 0, text), text);
    assert_eq!(
        region,
        PublicRegion::Bounded {
            range: lines(2, 2),
            indent: "  ".to_string(),
        }
    );
    assert_eq!(region.insertion_point(Position::new(0, 0)), Position::new(3, 0));
}

#[test]
fn region_lines_are_absolute() {
    let text = "class C {\npublic:\n    int a;\n    int b;\nprotected:\n    int c;\n};";
    let region = public_region(&class_at(10, 0, text), text);
    assert_eq!(region.range(), Some(lines(12, 13)));
    assert_eq!(region.indent(), "    ");
}

#[test]
fn public_slots_opens_region() {
    let text = "class C : public QObject {\n    Q_OBJECT\npublic slots:\n    void run();\nsignals:\n    void done();\nprivate:\n    int x;\n};";
    let region = public_region(&class_at(0, 0, text), text);
    assert_eq!(region.range(), Some(lines(3, 5)));
}

#[test]
fn open_region_runs_to_class_end() {
    let text = "struct S {\npublic:\n    int a;\n};";
    let region = public_region(&class_at(5, 0, text), text);
    assert_eq!(
        region,
        PublicRegion::Open {
            range: lines(7, 8),
            indent: "    ".to_string(),
        }
    );
    assert_eq!(region.insertion_point(Position::new(0, 0)), Position::new(8, 0));
}

#[test]
fn empty_section_collapses_on_specifier() {
    let text = "class C {\npublic:\nprivate:\n    int b;\n};";
    let region = public_region(&class_at(0, 0, text), text);
    assert_eq!(region.range(), Some(lines(1, 1)));
    assert_eq!(region.indent(), "    ");
    assert_eq!(region.insertion_point(Position::new(0, 0)), Position::new(2, 0));
}

#[test]
fn missing_public_uses_fallback() {
    let text = "class C {\n    int a;\nprivate:\n    int b;\n};";
    let class = class_at(3, 0, text);
    let region = public_region(&class, text);
    assert_eq!(
        region,
        PublicRegion::Missing {
            indent: "    ".to_string()
        }
    );
    assert_eq!(region.range(), None);
    assert_eq!(region.insertion_point(class_body_start(&class, text)), Position::new(4, 0));
}

#[test]
fn body_start_follows_allman_brace() {
    let text = "struct Point\n{\n    int m_x;\n};";
    let class = class_at(2, 0, text);
    assert_eq!(public_region(&class, text).insertion_point(class_body_start(&class, text)), Position::new(4, 0));
}

#[test]
fn body_start_skips_multi_line_head() {
    let text = "class Derived\n    : public Base,\n      public Other {\n    int a;\n};";
    assert_eq!(class_body_start(&class_at(0, 0, text), text), Position::new(3, 0));
}

#[test]
fn body_start_of_one_line_class_is_after_brace() {
    let text = "struct Tag {};";
    assert_eq!(class_body_start(&class_at(1, 4, text), text), Position::new(1, 16));
}

#[test]
fn nested_class_is_scanned_from_its_column() {
    // Slice of a nested class starting at column 4 of line 2.
    let text = "class Inner {\n    public:\n        int a;\n    private:\n        int b;\n    };";
    let region = public_region(&class_at(2, 4, text), text);
    assert_eq!(region.range(), Some(lines(4, 4)));
    assert_eq!(region.indent(), "        ");
}

#[test]
fn indented_specifiers_of_nested_classes_are_ignored() {
    let text = "class Outer {\npublic:\n    int a;\n    struct Inner {\n    private:\n        int x;\n    };\nprivate:\n    int b;\n};";
    let region = public_region(&class_at(0, 0, text), text);
    assert_eq!(region.range(), Some(lines(2, 6)));
}

#[test]
fn default_indent_follows_class_column() {
    let text = "class Inner {\n    public:\n    };";
    let region = public_region(&class_at(0, 4, text), text);
    assert_eq!(region.indent(), "        ");
}

#[test]
fn crlf_lines() {
    let text = "class C {\r\npublic:\r\n  int a;\r\nprivate:\r\n};";
    let region = public_region(&class_at(0, 0, text), text);
    assert_eq!(region.range(), Some(lines(2, 2)));
    assert_eq!(region.indent(), "  ");
}
