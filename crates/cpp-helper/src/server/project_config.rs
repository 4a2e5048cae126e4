use std::path::{Path, PathBuf};

use serde_json::Value;

const PROJECT_CONFIG_FILENAME: &str = "cpphelper.toml";

/// Walks parent directories from `start` looking for `cpphelper.toml`.
pub(crate) fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_file() {
        start.parent()?
    } else {
        start
    };
    loop {
        let candidate = dir.join(PROJECT_CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Reads a project config file as a settings payload.
///
/// Keys are the same camelCase keys the client sends, either at the top
/// level or under a `[cpphelper]` table. Returns `None` if the file cannot
/// be read or parsed.
pub(crate) fn load_project_config(path: &Path) -> Option<Value> {
    let content = std::fs::read_to_string(path).ok()?;
    let table: toml::Table = toml::from_str(&content).ok()?;
    serde_json::to_value(table).ok()
}

pub(crate) fn resolve_project_config(root: &Path) -> Option<(PathBuf, Value)> {
    let path = find_project_config(root)?;
    let payload = load_project_config(&path)?;
    Some((path, payload))
}

#[cfg(test)]
#[path = "../../tests/src/server/project_config_tests.rs"]
mod tests;
