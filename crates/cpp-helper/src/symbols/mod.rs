//! Class lookup over clangd document symbol trees.

mod locate;
mod tree;

pub use locate::{locate_class, locate_class_at};
pub use tree::{ClassKind, ClassSymbol, SymbolNode, find_class_symbols};

#[cfg(test)]
#[path = "../../tests/src/symbols/tree_tests.rs"]
mod tests;
