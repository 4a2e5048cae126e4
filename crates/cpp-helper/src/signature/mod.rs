//! Canonical declarations and definitions rebuilt from function hovers.

mod kind;
mod parser;

pub use kind::SignatureKind;
pub use parser::{FunctionSignature, parse_signature};
