use std::path::Path;

use tower_lsp::lsp_types::{DocumentLink, Position, Range, Url};

use super::location::{BUILD_PREFIX, ERROR_PREFIX, WARNING_PREFIX, parse_location, resolve_build_path};

/// Links from compiler locations in a build log to the files they name.
/// Locations that do not resolve to an existing file are skipped.
pub fn build_output_links(
    text: &str,
    workspace_root: &Path,
) -> Vec<DocumentLink> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| link_on_line(line, index as u32, workspace_root))
        .collect()
}

fn link_on_line(
    line: &str,
    line_number: u32,
    workspace_root: &Path,
) -> Option<DocumentLink> {
    let prefix = [BUILD_PREFIX, ERROR_PREFIX, WARNING_PREFIX]
        .into_iter()
        .find(|prefix| line.starts_with(prefix))?;
    let message = &line[prefix.len()..];
    let location = parse_location(message)?;

    let path = resolve_build_path(location.path, workspace_root);
    if !path.is_file() {
        return None;
    }
    let mut target = Url::from_file_path(&path).ok()?;
    target.set_fragment(Some(&format!("{},{}", location.line, location.column)));

    let start = prefix.encode_utf16().count() as u32;
    let end = start + location.text.encode_utf16().count() as u32;
    Some(DocumentLink {
        range: Range::new(Position::new(line_number, start), Position::new(line_number, end)),
        target: Some(target),
        tooltip: None,
        data: None,
    })
}

#[cfg(test)]
#[path = "../../tests/src/output/links_tests.rs"]
mod tests;
