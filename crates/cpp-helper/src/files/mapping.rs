use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

const HEADER_EXTENSIONS: [&str; 4] = ["h", "hpp", "h++", "hh"];

/// Extension pairs used to switch between a header and its source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeaderSourceMapping {
    pub name: String,
    pub header: Vec<String>,
    pub source: Vec<String>,
}

pub fn default_mappings() -> Vec<HeaderSourceMapping> {
    vec![HeaderSourceMapping {
        name: "C++".to_string(),
        header: [".h", ".hpp", ".hh", ".hxx"].map(String::from).to_vec(),
        source: [".cpp", ".cc", ".cxx", ".c"].map(String::from).to_vec(),
    }]
}

pub fn is_header(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| HEADER_EXTENSIONS.contains(&ext))
}

/// Source extension paired with a header extension (`.hpp` -> `.cpp`, `.h` -> `.c`).
pub fn source_extension_for(header_extension: &str) -> &'static str {
    match header_extension {
        ".h" => ".c",
        _ => ".cpp",
    }
}

/// Source file that receives definitions for functions declared in `header`.
/// `None` when `header` is not a header.
pub fn implementation_target(header: &Path) -> Option<PathBuf> {
    if !is_header(header) {
        return None;
    }
    let extension = format!(".{}", header.extension()?.to_str()?);
    let stem = header.file_stem()?.to_str()?;
    Some(header.with_file_name(format!("{stem}{}", source_extension_for(&extension))))
}

/// Counterpart extensions of `extension` in the first mapping that lists it.
pub fn counterpart_extensions<'a>(
    extension: &str,
    mappings: &'a [HeaderSourceMapping],
) -> Option<&'a [String]> {
    mappings.iter().find_map(|mapping| {
        if mapping.header.iter().any(|ext| ext == extension) {
            Some(mapping.source.as_slice())
        } else if mapping.source.iter().any(|ext| ext == extension) {
            Some(mapping.header.as_slice())
        } else {
            None
        }
    })
}

/// Header for a source file or source for a header.
///
/// Siblings in the same directory win. Otherwise every workspace root is
/// searched and the candidate closest to `path` in the directory tree is used.
pub fn find_counterpart(
    path: &Path,
    mappings: &[HeaderSourceMapping],
    workspace_roots: &[PathBuf],
) -> Option<PathBuf> {
    let extension = format!(".{}", path.extension()?.to_str()?);
    let stem = path.file_stem()?.to_str()?;
    let Some(extensions) = counterpart_extensions(&extension, mappings) else {
        debug!("[files] no header/source mapping for {extension}");
        return None;
    };
    let names: Vec<String> = extensions.iter().map(|ext| format!("{stem}{ext}")).collect();

    if let Some(dir) = path.parent() {
        for name in &names {
            let sibling = dir.join(name);
            if sibling.is_file() {
                return Some(sibling);
            }
        }
    }

    let origin = path.parent().unwrap_or(path);
    let mut best: Option<(usize, PathBuf)> = None;
    for root in workspace_roots {
        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(should_descend)
            .filter_map(|entry| entry.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };
            if !names.iter().any(|name| name == file_name) {
                continue;
            }
            let distance = tree_distance(origin, entry.path());
            if best.as_ref().is_none_or(|(best_distance, _)| distance < *best_distance) {
                best = Some((distance, entry.into_path()));
            }
        }
    }
    best.map(|(_, path)| path)
}

fn should_descend(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    let Some(name) = entry.file_name().to_str() else {
        return false;
    };
    if name.starts_with('.') {
        return false;
    }
    !matches!(name, "build" | "out" | "bin" | "obj" | "node_modules" | "target")
}

/// Number of path components that differ between directory `from` and `to`.
fn tree_distance(
    from: &Path,
    to: &Path,
) -> usize {
    let from: Vec<Component<'_>> = from.components().collect();
    let to: Vec<Component<'_>> = to.components().collect();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();
    (from.len() - common) + (to.len() - common)
}

#[cfg(test)]
#[path = "../../tests/src/files/mapping_tests.rs"]
mod tests;
