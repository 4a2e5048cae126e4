use std::path::{Path, PathBuf};

use serde::Serialize;
use tower_lsp::lsp_types::{Range, TextEdit};

use super::header_guard::header_guard_name;
use super::upper_first;

const CLASS_PLACEHOLDER: &str = "${className}";
const FILE_PLACEHOLDER: &str = "${fileName}";

pub const DEFAULT_CLASS_TEMPLATE: &str = "\nclass ${className}\n{\npublic:\n    ${className}();\n    ~${className}();\n};\n";
pub const DEFAULT_UNIT_TEST_TEMPLATE: &str = "#include <gtest/gtest.h>\n\nTEST(${fileName}Test, Basic)\n{\n}\n";

/// Templates and naming used when new files or regions are generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldTemplates {
    pub header_extension: String,
    pub source_extension: String,
    pub class_template: String,
    pub unit_test_template: String,
    pub region_start: String,
    pub region_end: String,
    pub guard_pattern: String,
}

impl Default for ScaffoldTemplates {
    fn default() -> Self {
        Self {
            header_extension: ".hpp".to_string(),
            source_extension: ".cpp".to_string(),
            class_template: DEFAULT_CLASS_TEMPLATE.to_string(),
            unit_test_template: DEFAULT_UNIT_TEST_TEMPLATE.to_string(),
            region_start: "#pragma region".to_string(),
            region_end: "#pragma endregion".to_string(),
            guard_pattern: super::DEFAULT_GUARD_PATTERN.to_string(),
        }
    }
}

/// A file the editor should create. `exists` is checked on disk so an
/// existing file is reported instead of overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldFile {
    pub path: PathBuf,
    pub content: String,
    pub exists: bool,
}

impl ScaffoldFile {
    fn new(
        path: PathBuf,
        content: String,
    ) -> Self {
        let exists = path.exists();
        Self { path, content, exists }
    }
}

/// Header and source file for a new class in `dir`.
pub fn class_files(
    dir: &Path,
    class_name: &str,
    templates: &ScaffoldTemplates,
) -> (ScaffoldFile, ScaffoldFile) {
    let header_name = format!("{class_name}{}", templates.header_extension);
    let guard = header_guard_name(class_name, &templates.guard_pattern);
    let body = templates.class_template.replace(CLASS_PLACEHOLDER, class_name);
    let header = format!("#ifndef {guard}\n#define {guard}\n{body}\n#endif // {guard}\n");
    let source = format!("#include \"{header_name}\"\n");

    (
        ScaffoldFile::new(dir.join(&header_name), header),
        ScaffoldFile::new(dir.join(format!("{class_name}{}", templates.source_extension)), source),
    )
}

/// `test_<name>.cpp` in `dir`, with `${fileName}` set to the capitalised name.
pub fn unit_test_file(
    dir: &Path,
    name: &str,
    templates: &ScaffoldTemplates,
) -> ScaffoldFile {
    let name = name.to_lowercase();
    let content = templates.unit_test_template.replace(FILE_PLACEHOLDER, &upper_first(&name));
    ScaffoldFile::new(dir.join(format!("test_{name}.cpp")), content)
}

/// Region markers around `selection`.
pub fn region_edits(
    selection: Range,
    templates: &ScaffoldTemplates,
) -> Vec<TextEdit> {
    vec![
        TextEdit::new(
            Range::new(selection.start, selection.start),
            format!("\n{}\n", templates.region_start),
        ),
        TextEdit::new(Range::new(selection.end, selection.end), format!("\n{}\n", templates.region_end)),
    ]
}

#[cfg(test)]
#[path = "../../tests/src/generate/scaffold_tests.rs"]
mod tests;
