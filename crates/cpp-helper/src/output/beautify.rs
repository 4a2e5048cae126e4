use std::fmt::{Display, Formatter};

use serde::Serialize;

use super::location::{BUILD_PREFIX, collapse_current_dir, parse_location};

const BUILD_STARTED: &str = "[build] Starting build";
// MSVC writes `: error C2065`, GCC and Clang write `: error: ...` (localised when LANG is set).
const ERROR_KEYS: [&str; 5] = [": error ", ": fatal error: ", ": error: ", ": 致命错误：", ": 错误："];
const WARNING_KEYS: [&str; 3] = [": 警告：", ": warning ", ": warning: "];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageKind {
    Error,
    Warning,
}

impl MessageKind {
    fn tag(self) -> &'static str {
        match self {
            Self::Error => "Eror",
            Self::Warning => "Warn",
        }
    }
}

/// A compiler error or warning condensed to one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildMessage {
    pub kind: MessageKind,
    /// Location text, e.g. `src/a.cpp:14:5`.
    pub file: String,
    pub hint: String,
}

impl Display for BuildMessage {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "-[{}] {} || {}", self.kind.tag(), self.file, self.hint)
    }
}

/// Condense one `[build]` line. Lines without a location or without an error
/// or warning marker give `None`.
pub fn beautify_line(line: &str) -> Option<BuildMessage> {
    let message = line.strip_prefix(BUILD_PREFIX)?;
    let location = parse_location(message)?;
    let (kind, hint) = find_hint(line)?;
    Some(BuildMessage {
        kind,
        file: collapse_current_dir(location.text),
        hint: hint.to_string(),
    })
}

fn find_hint(line: &str) -> Option<(MessageKind, &str)> {
    let keyed = |keys: &[&str], kind: MessageKind| {
        keys.iter()
            .find_map(|key| line.find(key).map(|index| (kind, &line[index + key.len()..])))
    };
    keyed(&ERROR_KEYS, MessageKind::Error).or_else(|| keyed(&WARNING_KEYS, MessageKind::Warning))
}

/// Rendered messages of the last build in `text`.
pub fn beautify_output(text: &str) -> Vec<String> {
    let mut rendered = Vec::new();
    for line in text.lines() {
        if line.contains(BUILD_STARTED) {
            rendered.clear();
            continue;
        }
        if let Some(message) = beautify_line(line) {
            rendered.push(message.to_string());
        }
    }
    rendered
}

#[cfg(test)]
#[path = "../../tests/src/output/beautify_tests.rs"]
mod tests;
