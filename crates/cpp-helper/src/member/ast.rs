use serde::Deserialize;
use tower_lsp::lsp_types::Range;

/// Node returned by clangd's `textDocument/ast` extension.
///
/// Only `kind`, `range` and `children` are consumed. The other fields show up
/// in `Debug` output when a request is traced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AstNode {
    pub role: String,
    pub kind: String,
    pub detail: Option<String>,
    pub arcana: Option<String>,
    pub range: Option<Range>,
    pub children: Vec<AstNode>,
}

impl AstNode {
    /// clangd reports builtin types (`int`, `double`, ...) as a `Builtin` type child.
    pub fn has_builtin_type(&self) -> bool {
        self.children.first().is_some_and(|child| child.kind == "Builtin")
    }
}
