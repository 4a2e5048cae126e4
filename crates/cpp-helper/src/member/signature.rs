use serde::Serialize;
use tracing::debug;

use crate::hover::HoverBlock;

use super::ast::AstNode;

/// Conventional prefix stripped from data member names.
pub const DEFAULT_MEMBER_PREFIX: &str = "m_";

/// Types that are always passed by value regardless of configuration.
const BUILTIN_TYPES: [&str; 1] = ["std::size_t"];

/// Facts about a data member gathered from its hover and AST node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSignature {
    #[serde(rename = "type")]
    pub member_type: String,
    /// Identifier with the member prefix removed (`m_count` -> `count`).
    pub canonical_name: String,
    /// Identifier as declared.
    pub original_name: String,
    pub class_name: String,
    pub is_builtin: bool,
}

impl MemberSignature {
    /// Accessors can only be generated once both a type and a name are known.
    pub fn is_complete(&self) -> bool {
        !self.member_type.is_empty() && !self.canonical_name.is_empty()
    }
}

/// [`extract_member_with_prefix`] using the `m_` convention.
pub fn extract_member(
    hover: &str,
    ast: Option<&AstNode>,
    ext_builtin_types: &[String],
) -> MemberSignature {
    extract_member_with_prefix(hover, ast, ext_builtin_types, DEFAULT_MEMBER_PREFIX)
}

/// Read a `field` hover. Any other hover leaves every fact empty.
pub fn extract_member_with_prefix(
    hover: &str,
    ast: Option<&AstNode>,
    ext_builtin_types: &[String],
    prefix: &str,
) -> MemberSignature {
    let mut member = MemberSignature::default();
    let block = HoverBlock::parse(hover);
    if !block.title_has("field") {
        debug!("[member] hover is not a field: {:?}", block.title());
        return member;
    }

    member.original_name = block.entity().unwrap_or_default().to_string();
    member.canonical_name = canonical_name(&member.original_name, prefix).to_string();
    member.member_type = block.type_field().unwrap_or_default().to_string();
    member.class_name = block.class_name().unwrap_or_default().to_string();
    member.is_builtin = is_builtin(ast, &member.member_type, ext_builtin_types);
    member
}

/// Strip `prefix` from `name`; names without it (or made only of it) are kept.
pub fn canonical_name<'a>(
    name: &'a str,
    prefix: &str,
) -> &'a str {
    match name.strip_prefix(prefix) {
        Some(rest) if !prefix.is_empty() && !rest.is_empty() => rest,
        _ => name,
    }
}

fn is_builtin(
    ast: Option<&AstNode>,
    member_type: &str,
    ext_builtin_types: &[String],
) -> bool {
    if ast.is_some_and(AstNode::has_builtin_type) {
        return true;
    }
    if BUILTIN_TYPES.contains(&member_type) {
        return true;
    }
    ext_builtin_types.iter().any(|ty| ty == member_type)
}

#[cfg(test)]
#[path = "../../tests/src/member/signature_tests.rs"]
mod tests;
