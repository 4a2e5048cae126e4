use serde_json::json;
use tower_lsp::lsp_types::SymbolKind;

use super::*;

fn range(start: u32, end: u32) -> serde_json::Value {
    json!({ "start": { "line": start, "character": 0 }, "end": { "line": end, "character": 2 } })
}

fn sample_tree() -> Vec<SymbolNode> {
    serde_json::from_value(json!([
        {
            "name": "app",
            "kind": 3,
            "range": range(0, 40),
            "children": [
                {
                    "name": "Outer",
                    "kind": 5,
                    "range": range(2, 30),
                    "children": [
                        { "name": "count", "kind": 6, "range": range(4, 4) },
                        { "name": "m_count", "kind": 8, "range": range(5, 5) },
                        {
                            "name": "Inner",
                            "kind": 23,
                            "range": range(10, 20),
                            "children": [
                                { "name": "Deep", "kind": 5, "range": range(12, 15) }
                            ]
                        }
                    ]
                }
            ]
        },
        { "name": "helper", "kind": 12, "range": range(42, 44) },
        { "name": "Tail", "kind": 23, "range": range(46, 50) }
    ]))
    .unwrap()
}

#[test]
fn collects_classes_in_pre_order() {
    let classes = find_class_symbols(&sample_tree());
    let names: Vec<_> = classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Outer", "Inner", "Deep", "Tail"]);
    assert_eq!(classes[0].kind, ClassKind::Class);
    assert_eq!(classes[1].kind, ClassKind::Struct);
    assert_eq!(classes[0].children.len(), 3);
}

#[test]
fn has_method_only_matches_methods() {
    let classes = find_class_symbols(&sample_tree());
    let outer = &classes[0];
    assert!(outer.has_method("count"));
    assert!(!outer.has_method("m_count"));
    assert!(!outer.has_method("setCount"));
}

#[test]
fn symbol_kind_mapping() {
    assert_eq!(ClassKind::from_symbol_kind(SymbolKind::CLASS), Some(ClassKind::Class));
    assert_eq!(ClassKind::from_symbol_kind(SymbolKind::STRUCT), Some(ClassKind::Struct));
    assert_eq!(ClassKind::from_symbol_kind(SymbolKind::METHOD), None);
}

#[test]
fn empty_tree_has_no_classes() {
    assert!(find_class_symbols(&[]).is_empty());
}
