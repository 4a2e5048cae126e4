use super::*;

fn hover(
    title: &str,
    code: &str,
) -> String {
    format!("{title}  \n\n---\n→ `void`  \n\n---\n```cpp\n{code}\n```")
}

#[test]
fn constructor_falls_back_to_class_name() {
    let text = hover("`get` is a constructor", "// In Widget\nWidget(int x)");
    let sig = FunctionSignature::parse(&text).unwrap();
    assert_eq!(sig.kind, SignatureKind::Constructor);
    assert_eq!(sig.class_name, "Widget");
    assert_eq!(sig.definition(), "Widget::Widget(int x)\n{\n}\n");
    assert_eq!(sig.declaration(), "Widget(int x);");
}

#[test]
fn constructor_with_access_specifier() {
    let text = hover("### constructor `Widget`", "// In Widget\npublic: Widget(const Config &config, int id)");
    assert_eq!(parse_signature(&text), "Widget::Widget(const Config &config, int id)\n{\n}\n");
}

#[test]
fn static_member_keeps_static_in_declaration_only() {
    let text = hover(
        "### static-method `appendResponseFunc`",
        "// In SignalTower\npublic: static void appendResponseFunc(int responseFunc)",
    );
    let sig = FunctionSignature::parse(&text).unwrap();
    assert_eq!(sig.kind, SignatureKind::StaticMember);
    assert_eq!(sig.return_type, "void");
    assert_eq!(sig.definition(), "void SignalTower::appendResponseFunc(int responseFunc)\n{\n}\n");
    assert_eq!(sig.declaration(), "static void appendResponseFunc(int responseFunc);");
}

#[test]
fn virtual_member_drops_override() {
    let text = hover(
        "### instance-method `paint`",
        "// In Canvas\npublic: virtual const std::vector<int> &paint(Painter *p) const override",
    );
    let sig = FunctionSignature::parse(&text).unwrap();
    assert_eq!(sig.return_type, "const std::vector<int> &");
    assert_eq!(sig.function_main, "paint(Painter *p) const");
    assert_eq!(sig.definition(), "const std::vector<int> & Canvas::paint(Painter *p) const\n{\n}\n");
}

#[test]
fn pure_virtual_marker_is_removed() {
    let text = hover("### instance-method `run`", "// In Task\nprotected: virtual void run() = 0");
    assert_eq!(parse_signature(&text), "void Task::run()\n{\n}\n");
}

#[test]
fn private_member_return_type() {
    let text = hover("### instance-method `size`", "// In Buffer\nprivate: std::size_t size() const");
    assert_eq!(parse_signature(&text), "std::size_t Buffer::size() const\n{\n}\n");
}

#[test]
fn template_member_has_empty_return_type() {
    let text = hover("### instance-method `get`", "// In Registry\ntemplate <typename T>\npublic: T get(int key)");
    let sig = FunctionSignature::parse(&text).unwrap();
    assert_eq!(sig.return_type, "");
    assert_eq!(sig.definition(), "Registry::get(int key)\n{\n}\n");
}

#[test]
fn destructor_from_class_title() {
    let text = hover("### class `~Widget`", "// In Widget\npublic: ~Widget()");
    let sig = FunctionSignature::parse(&text).unwrap();
    assert_eq!(sig.kind, SignatureKind::Destructor);
    assert_eq!(sig.return_type, "void");
    assert_eq!(sig.definition(), "Widget::~Widget()\n{\n}\n");
    assert_eq!(sig.declaration(), "~Widget();");
}

#[test]
fn free_function_in_namespace() {
    let text = hover("### function `dispatch`", "// In namespace jet::handler\nbool dispatch(int code, const char *msg)");
    let sig = FunctionSignature::parse(&text).unwrap();
    assert_eq!(sig.namespace, "jet::handler");
    assert_eq!(sig.definition(), "bool jet::handler::dispatch(int code, const char *msg)\n{\n}\n");
    assert_eq!(sig.declaration(), "bool dispatch(int code, const char *msg);");
}

#[test]
fn free_function_without_namespace_has_no_leading_scope() {
    let text = hover("### function `add`", "int add(int a, int b)");
    assert_eq!(parse_signature(&text), "int add(int a, int b)\n{\n}\n");
}

#[test]
fn static_free_function_uses_qualifier() {
    let text = hover("### function `helper`", "static inline int helper()");
    let sig = FunctionSignature::parse(&text).unwrap();
    assert_eq!(sig.return_type, "inline int");
}

#[test]
fn name_must_match_whole_identifier() {
    let text = hover("### function `get`", "int budget(int a)\nint get(int b)");
    let sig = FunctionSignature::parse(&text).unwrap();
    assert_eq!(sig.function_main, "get(int b)");
    assert_eq!(sig.return_type, "int");
}

#[test]
fn unknown_title_yields_empty() {
    let text = hover("### variable `count`", "int count");
    assert_eq!(FunctionSignature::parse(&text), None);
    assert_eq!(parse_signature(&text), "");
}

#[test]
fn missing_fence_yields_empty() {
    assert_eq!(parse_signature("### instance-method `resize`\n\nvoid resize(int w)"), "");
    assert_eq!(parse_signature("### instance-method `resize`\n```cpp\n// In Widget\nvoid resize(int w)"), "");
    assert_eq!(parse_signature(""), "");
}

#[test]
fn missing_declaration_line_yields_empty() {
    let text = hover("### instance-method `resize`", "// In Widget\npublic: void reshape(int w)");
    assert_eq!(parse_signature(&text), "");
}
