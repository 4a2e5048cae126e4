use super::*;

fn test_doc(text: &str) -> Document {
    Document::new(Url::parse("file:///widget.hpp").unwrap(), "cpp".to_string(), text.to_string(), 1)
}

#[test]
fn line_offsets_basic() {
    assert_eq!(test_doc("").line_count(), 1);
    assert_eq!(test_doc("class A;\nclass B;\n").line_count(), 3);
}

#[test]
fn offset_roundtrip() {
    let doc = test_doc("int width;\nint height;\n");
    let pos = Position::new(1, 0);
    let off = doc.offset_of(pos).unwrap();
    assert_eq!(off, 11);
    assert_eq!(doc.position_of(off), pos);
    assert_eq!(doc.offset_of(Position::new(0, 99)), Some(10));
    assert_eq!(doc.offset_of(Position::new(5, 0)), None);
}

#[test]
fn text_in_class_range() {
    let doc = test_doc("// header\n    class Inner {\n    public:\n    };\n");
    let range = Range::new(Position::new(1, 4), Position::new(3, 6));
    assert_eq!(doc.text_in(range), "class Inner {\n    public:\n    };");
}

#[test]
fn text_in_clamps_past_end() {
    let doc = test_doc("struct S {};");
    let range = Range::new(Position::new(0, 7), Position::new(40, 0));
    assert_eq!(doc.text_in(range), "S {};");
    assert_eq!(doc.text_in(Range::new(Position::new(9, 0), Position::new(9, 1))), "");
}

#[test]
fn utf16_columns() {
    let doc = test_doc("// é𝄞\nint x;");
    assert_eq!(doc.end_position(), Position::new(1, 6));
    assert_eq!(doc.offset_of(Position::new(0, 6)), Some("// é𝄞".len()));
}

#[test]
fn set_content_updates_lines() {
    let mut doc = test_doc("one\ntwo");
    assert_eq!(doc.line_count(), 2);
    doc.set_content("a\nb\nc\n".to_string(), 2);
    assert_eq!(doc.line_count(), 4);
    assert_eq!(doc.version, 2);
}

#[test]
fn incremental_change() {
    let mut doc = test_doc("int m_count;");
    doc.apply_changes(
        vec![TextDocumentContentChangeEvent {
            range: Some(Range::new(Position::new(0, 4), Position::new(0, 11))),
            range_length: None,
            text: "m_total".to_string(),
        }],
        2,
    );
    assert_eq!(doc.text, "int m_total;");
    assert_eq!(doc.version, 2);
}

#[test]
fn full_content_change() {
    let mut doc = test_doc("old content");
    doc.apply_changes(
        vec![TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "new content".to_string(),
        }],
        3,
    );
    assert_eq!(doc.text, "new content");
    assert_eq!(doc.version, 3);
}
