use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix cmake-tools puts on every compiler line.
pub const BUILD_PREFIX: &str = "[build] ";
/// Prefixes of beautified lines. Both have the same width as [`BUILD_PREFIX`].
pub const ERROR_PREFIX: &str = "-[Eror] ";
pub const WARNING_PREFIX: &str = "-[Warn] ";

static GCC_LOCATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*?):(\d+):(\d+)").unwrap());
static MSVC_LOCATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*?)\((\d+)\)").unwrap());
static DRIVE_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]:[\\/]").unwrap());

/// `path:line:col` (GCC, Clang) or `path(line)` (MSVC) at the start of a
/// compiler message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation<'a> {
    /// The whole matched location text, e.g. `../src/a.cpp:14:5`.
    pub text: &'a str,
    pub path: &'a str,
    pub line: u32,
    pub column: u32,
}

/// Location at the very start of `message` (the text after the line prefix).
pub fn parse_location(message: &str) -> Option<SourceLocation<'_>> {
    if let Some(caps) = GCC_LOCATION.captures(message) {
        return Some(SourceLocation {
            text: caps.get(0)?.as_str(),
            path: caps.get(1)?.as_str(),
            line: caps[2].parse().ok()?,
            column: caps[3].parse().ok()?,
        });
    }
    let caps = MSVC_LOCATION.captures(message)?;
    Some(SourceLocation {
        text: caps.get(0)?.as_str(),
        path: caps.get(1)?.as_str(),
        line: caps[2].parse().ok()?,
        column: 1,
    })
}

/// Collapse the first `/./` (or `\.\`) the way build logs are shown to users.
pub fn collapse_current_dir(path: &str) -> String {
    path.replacen("/./", "/", 1).replacen("\\.\\", "\\", 1)
}

/// Resolve a path printed by the build against `workspace_root`.
///
/// Relative paths printed from a build directory look like `../../src/a.cpp`;
/// everything up to the last `./` is dropped and the rest is taken relative to
/// the workspace root.
pub fn resolve_build_path(
    raw: &str,
    workspace_root: &Path,
) -> PathBuf {
    let collapsed = collapse_current_dir(raw.trim());
    let path = if is_absolute(&collapsed) {
        PathBuf::from(collapsed)
    } else {
        let relative = match collapsed.rfind("./").or_else(|| collapsed.rfind(".\\")) {
            Some(index) => &collapsed[index + 2..],
            None => collapsed.as_str(),
        };
        workspace_root.join(relative)
    };
    lexical_normalize(&path)
}

fn is_absolute(path: &str) -> bool {
    Path::new(path).is_absolute() || DRIVE_PATH.is_match(path)
}

/// Remove `.` and resolve `..` without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else {
                    normalized.push(component);
                }
            },
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
#[path = "../../tests/src/output/location_tests.rs"]
mod tests;
