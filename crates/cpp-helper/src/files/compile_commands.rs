use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

pub const COMPILE_COMMANDS_FILE: &str = "compile_commands.json";

static WORKSPACE_FOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\$\{workspaceFolder\}").unwrap());

/// One regex rewrite applied to every `command` string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StripRule {
    #[serde(rename = "match")]
    pub pattern: String,
    #[serde(default)]
    pub replace: String,
}

#[derive(Debug)]
pub enum StripError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidRule {
        pattern: String,
        source: regex::Error,
    },
    NotAnArray(PathBuf),
}

impl Display for StripError {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Json { path, source } => write!(f, "{} is not valid JSON: {source}", path.display()),
            Self::InvalidRule { pattern, source } => write!(f, "invalid strip pattern {pattern:?}: {source}"),
            Self::NotAnArray(path) => write!(f, "{} is not a compilation database array", path.display()),
        }
    }
}

impl std::error::Error for StripError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidRule { source, .. } => Some(source),
            Self::NotAnArray(_) => None,
        }
    }
}

/// Substitute `${workspaceFolder}` (any case) in a configured directory.
pub fn resolve_dir(
    template: &str,
    workspace_root: &Path,
) -> PathBuf {
    let root = workspace_root.to_string_lossy();
    PathBuf::from(WORKSPACE_FOLDER.replace_all(template, NoExpand(&root)).into_owned())
}

/// Rule set name for the running platform, if one is supported.
pub fn current_platform() -> Option<&'static str> {
    if cfg!(target_os = "windows") {
        Some("windows")
    } else if cfg!(target_os = "linux") {
        Some("linux")
    } else {
        None
    }
}

/// Rewrite the `command` of every entry in `src` and write compact JSON to
/// `dst`. Each rule replaces its first match only. Returns the number of
/// entries whose command changed; an empty `src` is left alone.
pub fn strip_compile_commands(
    src: &Path,
    dst: &Path,
    rules: &[StripRule],
) -> Result<usize, StripError> {
    let data = fs::read_to_string(src).map_err(|source| StripError::Io {
        path: src.to_path_buf(),
        source,
    })?;
    if data.is_empty() || data == "\n" {
        debug!("[compile-commands] {} is empty, skipping", src.display());
        return Ok(0);
    }

    let compiled = rules
        .iter()
        .map(|rule| {
            Regex::new(&rule.pattern)
                .map(|regex| (regex, rule.replace.as_str()))
                .map_err(|source| StripError::InvalidRule {
                    pattern: rule.pattern.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut database: Value = serde_json::from_str(&data).map_err(|source| StripError::Json {
        path: src.to_path_buf(),
        source,
    })?;
    let entries = database
        .as_array_mut()
        .ok_or_else(|| StripError::NotAnArray(src.to_path_buf()))?;

    let mut rewritten = 0;
    for entry in entries.iter_mut() {
        let Some(command) = entry.get_mut("command") else {
            continue;
        };
        let Some(original) = command.as_str() else {
            continue;
        };
        let stripped = compiled
            .iter()
            .fold(original.to_string(), |text, (regex, replace)| regex.replace(&text, *replace).into_owned());
        if stripped != original {
            rewritten += 1;
            *command = Value::String(stripped);
        }
    }

    let output = serde_json::to_string(&database).map_err(|source| StripError::Json {
        path: dst.to_path_buf(),
        source,
    })?;
    fs::write(dst, output).map_err(|source| StripError::Io {
        path: dst.to_path_buf(),
        source,
    })?;
    Ok(rewritten)
}

#[cfg(test)]
#[path = "../../tests/src/files/compile_commands_tests.rs"]
mod tests;
