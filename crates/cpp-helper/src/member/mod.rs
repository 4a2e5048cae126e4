//! Data member facts used to synthesize accessors.

mod ast;
mod signature;

pub use ast::AstNode;
pub use signature::{DEFAULT_MEMBER_PREFIX, MemberSignature, canonical_name, extract_member, extract_member_with_prefix};
