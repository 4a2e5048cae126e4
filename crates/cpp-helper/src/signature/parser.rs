use tracing::debug;

use crate::hover::HoverBlock;

use super::kind::SignatureKind;

const EMPTY_BODY: &str = "\n{\n}\n";

/// Qualifiers preceding the return type, highest priority first.
const RETURN_TYPE_QUALIFIERS: [&str; 5] = ["static", "virtual", "public:", "private:", "protected:"];
const TEMPLATE_MARKERS: [&str; 2] = ["template<", "template <"];

/// Specifiers that may not be repeated on an out-of-line definition.
const DECLARATION_ONLY_SUFFIXES: [&str; 3] = ["override", "final", "= 0"];

/// A function-like entity reconstructed from a clangd hover block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub kind: SignatureKind,
    pub return_type: String,
    pub function_name: String,
    pub class_name: String,
    pub namespace: String,
    /// `name(parameters)` plus any trailing qualifiers, as shown in the hover.
    pub function_main: String,
}

impl FunctionSignature {
    /// Parse a hover block. Returns `None` for unsupported titles and for
    /// blocks whose code fence or declaration line cannot be found.
    pub fn parse(hover: &str) -> Option<Self> {
        let block = HoverBlock::parse(hover);
        let kind = SignatureKind::classify(block.title());
        if kind == SignatureKind::Unknown {
            debug!("[signature] unsupported hover title: {:?}", block.title());
            return None;
        }

        let Some(function_name) = block.entity() else {
            debug!("[signature] no quoted name on title: {:?}", block.title());
            return None;
        };
        let Some(code) = block.code() else {
            debug!("[signature] no fenced code block for `{function_name}`");
            return None;
        };

        let mut signature = Self {
            kind,
            return_type: String::new(),
            function_name: function_name.to_string(),
            class_name: String::new(),
            namespace: String::new(),
            function_main: String::new(),
        };

        match kind {
            SignatureKind::Constructor => {
                signature.class_name = block.class_name().unwrap_or_default().to_string();
                signature.function_main = function_main(code, function_name)
                    .or_else(|| function_main(code, &signature.class_name))?;
            },
            SignatureKind::StaticMember | SignatureKind::NormalMember => {
                signature.class_name = block.class_name().unwrap_or_default().to_string();
                signature.return_type = return_type(code, function_name)?;
                signature.function_main = function_main(code, function_name)?;
            },
            SignatureKind::Destructor => {
                signature.class_name = function_name.trim_start_matches('~').to_string();
                signature.return_type = "void".to_string();
            },
            SignatureKind::NormalFunc => {
                signature.namespace = block.namespace().unwrap_or_default().to_string();
                signature.return_type = return_type(code, function_name)?;
                signature.function_main = function_main(code, function_name)?;
            },
            SignatureKind::Unknown => return None,
        }

        Some(signature)
    }

    /// Out-of-line definition with an empty body.
    pub fn definition(&self) -> String {
        let head = match self.kind {
            SignatureKind::Constructor => format!("{}::{}", self.class_name, self.function_main),
            SignatureKind::Destructor => format!("{0}::~{0}()", self.class_name),
            SignatureKind::StaticMember | SignatureKind::NormalMember => {
                with_return_type(&self.return_type, &format!("{}::{}", self.class_name, self.function_main))
            },
            SignatureKind::NormalFunc => {
                let qualified = if self.namespace.is_empty() {
                    self.function_main.clone()
                } else {
                    format!("{}::{}", self.namespace, self.function_main)
                };
                with_return_type(&self.return_type, &qualified)
            },
            SignatureKind::Unknown => return String::new(),
        };
        format!("{head}{EMPTY_BODY}")
    }

    /// In-class (or in-namespace) declaration terminated by `;`.
    pub fn declaration(&self) -> String {
        match self.kind {
            SignatureKind::Constructor => format!("{};", self.function_main),
            SignatureKind::Destructor => format!("~{}();", self.class_name),
            SignatureKind::StaticMember => {
                format!("static {};", with_return_type(&self.return_type, &self.function_main))
            },
            SignatureKind::NormalMember | SignatureKind::NormalFunc => {
                format!("{};", with_return_type(&self.return_type, &self.function_main))
            },
            SignatureKind::Unknown => String::new(),
        }
    }
}

/// Definition text for a hover block, or an empty string when it cannot be parsed.
pub fn parse_signature(hover: &str) -> String {
    FunctionSignature::parse(hover).map(|sig| sig.definition()).unwrap_or_default()
}

fn with_return_type(
    return_type: &str,
    rest: &str,
) -> String {
    if return_type.is_empty() {
        rest.to_string()
    } else {
        format!("{return_type} {rest}")
    }
}

/// Return type between the strongest qualifier keyword and the function name.
/// Templates are left empty: their return type cannot be reproduced reliably.
fn return_type(
    code: &str,
    name: &str,
) -> Option<String> {
    if TEMPLATE_MARKERS.iter().any(|marker| code.contains(marker)) {
        return Some(String::new());
    }

    let (line, at) = declaration_line(code, name)?;
    let prefix = &line[..at];
    let region = RETURN_TYPE_QUALIFIERS
        .iter()
        .find_map(|keyword| prefix.find(keyword).map(|idx| &prefix[idx + keyword.len()..]))
        .unwrap_or(prefix);
    Some(region.trim().to_string())
}

/// `name(params...)` through the end of the declaration line.
fn function_main(
    code: &str,
    name: &str,
) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    let (line, at) = declaration_line(code, name)?;
    Some(strip_declaration_only(&line[at..]).to_string())
}

/// First non-comment line containing `name(` as a whole identifier, with the
/// byte offset of the name inside that line.
fn declaration_line<'a>(
    code: &'a str,
    name: &str,
) -> Option<(&'a str, usize)> {
    let needle = format!("{name}(");
    code.lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .find_map(|line| find_identifier(line, &needle).map(|at| (line, at)))
}

fn find_identifier(
    line: &str,
    needle: &str,
) -> Option<usize> {
    let mut from = 0;
    while let Some(idx) = line[from..].find(needle) {
        let at = from + idx;
        let boundary = line[..at].chars().next_back().is_none_or(|ch| !is_identifier_char(ch));
        if boundary {
            return Some(at);
        }
        from = at + needle.len();
    }
    None
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn strip_declaration_only(main: &str) -> &str {
    let mut main = main.trim_end();
    loop {
        let Some(stripped) = DECLARATION_ONLY_SUFFIXES.iter().find_map(|suffix| main.strip_suffix(suffix)) else {
            return main;
        };
        main = stripped.trim_end();
    }
}

#[cfg(test)]
#[path = "../../tests/src/signature/parser_tests.rs"]
mod tests;
