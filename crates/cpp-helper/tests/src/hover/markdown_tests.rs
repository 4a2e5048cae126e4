use super::*;

const METHOD_HOVER: &str = "### instance-method `resize`  \n\n---\n→ `void`  \nParameters:  \n- `int width`  \n\n---\n```cpp\n// In Widget\npublic: void resize(int width)\n```";

const FIELD_HOVER: &str = "### field `m_defaultVal`  \n\n---\nType: `std::any`  \nOffset: 80 bytes  \nSize: 16 bytes  \n\n---\n```cpp\n// In HandlerBinding\nprivate: std::any m_defaultVal {}\n```";

#[test]
fn between_uses_first_open_and_next_close() {
    assert_eq!(between("a `x` b `y`", "`", "`"), Some("x"));
    assert_eq!(between("no markers", "`", "`"), None);
    assert_eq!(between("`open only", "`", "`"), None);
}

#[test]
fn fenced_code_strips_info_string() {
    assert_eq!(fenced_code(METHOD_HOVER), Some("// In Widget\npublic: void resize(int width)"));
}

#[test]
fn fenced_code_tolerates_trailing_whitespace_after_fence() {
    let hover = "### function `f`\n```cpp\nint f()\n```\n\n";
    assert_eq!(fenced_code(hover), Some("int f()"));
}

#[test]
fn fenced_code_requires_two_fences() {
    assert_eq!(fenced_code("### function `f`\n```cpp\nint f()"), None);
    assert_eq!(fenced_code("### function `f`"), None);
}

#[test]
fn quoted_name_reads_title_identifier() {
    assert_eq!(quoted_name("### instance-method `resize`  "), Some("resize"));
    assert_eq!(quoted_name("### class `~Widget`"), Some("~Widget"));
    assert_eq!(quoted_name("### field ``"), None);
    assert_eq!(quoted_name("no name here"), None);
}

#[test]
fn block_reads_class_scope() {
    let block = HoverBlock::parse(METHOD_HOVER);
    assert_eq!(block.entity(), Some("resize"));
    assert!(block.title_has("instance-method"));
    assert_eq!(block.class_name(), Some("Widget"));
    assert_eq!(block.namespace(), None);
}

#[test]
fn block_reads_namespace_scope() {
    let hover = "### function `dispatch`\n\n---\n```cpp\n// In namespace jet::handler\nvoid dispatch(int code)\n```";
    let block = HoverBlock::parse(hover);
    assert_eq!(block.namespace(), Some("jet::handler"));
    assert_eq!(block.class_name(), None);
}

#[test]
fn block_reads_type_field() {
    let block = HoverBlock::parse(FIELD_HOVER);
    assert_eq!(block.type_field(), Some("std::any"));
    assert_eq!(block.class_name(), Some("HandlerBinding"));
}

#[test]
fn missing_scope_comment_is_none() {
    let block = HoverBlock::parse("### function `f`\n```cpp\nint f()\n```");
    assert_eq!(block.class_name(), None);
    assert_eq!(block.namespace(), None);
    assert_eq!(block.type_field(), None);
}
