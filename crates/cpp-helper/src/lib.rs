pub mod access;
pub mod document;
pub mod files;
pub mod generate;
pub mod hover;
pub mod member;
pub mod output;
pub mod server;
pub mod signature;
pub mod symbols;
pub mod text_pos;

pub use access::{PublicRegion, public_region};
pub use member::{MemberSignature, extract_member};
pub use server::CppHelperServer;
pub use signature::{FunctionSignature, parse_signature};
pub use symbols::{ClassSymbol, find_class_symbols, locate_class};
