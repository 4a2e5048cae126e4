//! Text synthesis for accessors, special members, guards and scaffolding.

mod getter_setter;
mod header_guard;
mod scaffold;
mod special_member;

pub use getter_setter::{Accessor, GetterSetterOption, getter_setter_options, synthesize_getter_setter};
pub use header_guard::{
    DEFAULT_GUARD_PATTERN, amend_header_guard, create_header_guard, find_header_guard_lines, header_guard_name,
};
pub use scaffold::{
    DEFAULT_CLASS_TEMPLATE, DEFAULT_UNIT_TEST_TEMPLATE, ScaffoldFile, ScaffoldTemplates, class_files, region_edits,
    unit_test_file,
};
pub use special_member::{SpecialMember, synthesize_special_members};

use serde::Serialize;

const BODY_INDENT: &str = "    ";

/// Where a synthesized function body lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Inline body inside the class declaration.
    InHeader,
    /// Declaration in the class, qualified definition in the source file.
    OutOfLine,
}

impl Placement {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::InHeader => "(in header)",
            Self::OutOfLine => "(in source)",
        }
    }
}

/// Text produced for one function. `definition` is empty for inline bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedFunction {
    pub declaration: String,
    pub definition: String,
}

impl GeneratedFunction {
    /// Indent the declaration for placement inside a class body.
    pub fn indented(
        mut self,
        indent: &str,
    ) -> Self {
        self.declaration = indent_lines(&self.declaration, indent);
        self
    }
}

/// The pieces a function is assembled from.
struct FunctionParts {
    /// Head as written inside the class, e.g. `int count() const`.
    head: String,
    /// Head qualified with the class, e.g. `int Counter::count() const`.
    qualified_head: String,
    body: Vec<String>,
}

impl FunctionParts {
    fn render(
        &self,
        placement: Placement,
    ) -> GeneratedFunction {
        match placement {
            Placement::InHeader => GeneratedFunction {
                declaration: with_body(&self.head, &self.body),
                definition: String::new(),
            },
            Placement::OutOfLine => GeneratedFunction {
                declaration: format!("{};\n", self.head),
                definition: with_body(&self.qualified_head, &self.body),
            },
        }
    }
}

fn with_body(
    head: &str,
    body: &[String],
) -> String {
    let mut text = format!("{head}\n{{\n");
    for line in body {
        text.push_str(BODY_INDENT);
        text.push_str(line);
        text.push('\n');
    }
    text.push_str("}\n");
    text
}

/// Upper-case the first character, leaving the rest untouched.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Prefix every non-empty line of `text` with `indent`.
pub fn indent_lines(
    text: &str,
    indent: &str,
) -> String {
    text.split_inclusive('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect()
}

/// Declarations of `functions` joined for a single insertion.
pub fn declaration_block(functions: &[GeneratedFunction]) -> String {
    functions.iter().map(|function| function.declaration.as_str()).collect()
}

/// Definitions of `functions`, each preceded by a blank line, for appending to
/// a source file. Inline functions contribute nothing.
pub fn definition_block(functions: &[GeneratedFunction]) -> String {
    functions
        .iter()
        .filter(|function| !function.definition.is_empty())
        .map(|function| format!("\n{}", function.definition))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src/generate/mod_tests.rs"]
mod tests;
