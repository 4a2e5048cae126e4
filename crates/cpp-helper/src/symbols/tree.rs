use serde::Deserialize;
use tower_lsp::lsp_types::{Range, SymbolKind};

/// One node of a `textDocument/documentSymbol` response as forwarded by the editor.
///
/// `selectionRange` and friends are ignored; missing `children` means a leaf.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolNode {
    pub name: String,
    pub kind: SymbolKind,
    pub range: Range,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub children: Vec<SymbolNode>,
}

impl SymbolNode {
    pub fn is_method(&self) -> bool {
        self.kind == SymbolKind::METHOD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Struct,
}

impl ClassKind {
    pub fn from_symbol_kind(kind: SymbolKind) -> Option<Self> {
        match kind {
            SymbolKind::CLASS => Some(Self::Class),
            SymbolKind::STRUCT => Some(Self::Struct),
            _ => None,
        }
    }
}

/// A class or struct symbol lifted out of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSymbol {
    pub name: String,
    pub kind: ClassKind,
    pub range: Range,
    pub children: Vec<SymbolNode>,
}

impl ClassSymbol {
    fn from_node(node: &SymbolNode) -> Option<Self> {
        let kind = ClassKind::from_symbol_kind(node.kind)?;
        Some(Self {
            name: node.name.clone(),
            kind,
            range: node.range,
            children: node.children.clone(),
        })
    }

    /// Line-bounded containment; columns are not compared.
    pub fn contains_lines(
        &self,
        target: &Range,
    ) -> bool {
        target.start.line >= self.range.start.line && target.end.line <= self.range.end.line
    }

    /// Whether a direct child is a method called `name`.
    pub fn has_method(
        &self,
        name: &str,
    ) -> bool {
        self.children.iter().any(|child| child.is_method() && child.name == name)
    }
}

/// Every class and struct in `tree`, in pre-order. Nested classes appear after
/// their parent and are searched for further nesting.
pub fn find_class_symbols(tree: &[SymbolNode]) -> Vec<ClassSymbol> {
    let mut result = Vec::new();
    collect_classes(tree, &mut result);
    result
}

fn collect_classes(
    nodes: &[SymbolNode],
    out: &mut Vec<ClassSymbol>,
) {
    for node in nodes {
        if let Some(class) = ClassSymbol::from_node(node) {
            out.push(class);
        }
        collect_classes(&node.children, out);
    }
}
