use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde_json::Value;

use crate::files::{HeaderSourceMapping, StripRule, default_mappings};
use crate::generate::ScaffoldTemplates;
use crate::member::DEFAULT_MEMBER_PREFIX;

pub(crate) const SETTINGS_SECTION_KEY: &str = "cpphelper";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServerSettings {
    pub getter_setter: GetterSetterSettings,
    pub templates: ScaffoldTemplates,
    pub auto_create_header_guard: bool,
    pub navigation: NavigationSettings,
    pub compile_commands: CompileCommandsSettings,
    pub logging: LoggingSettings,
}

impl ServerSettings {
    pub fn from_lsp_payload(payload: Option<&Value>) -> Self {
        let mut settings = Self::default();
        if let Some(payload) = payload {
            settings = settings.merged_with_payload(payload);
        }
        settings
    }

    pub fn merged_with_payload(
        &self,
        payload: &Value,
    ) -> Self {
        let mut merged = self.clone();

        for candidate in payload_candidates(payload) {
            if let Ok(patch) = serde_json::from_value::<ServerSettingsPatch>(candidate.clone()) {
                merged.apply_patch(patch);
            }
        }

        merged.normalize();
        merged
    }

    fn apply_patch(
        &mut self,
        patch: ServerSettingsPatch,
    ) {
        if let Some(types) = patch.getter_setter_ext_builtin_types {
            self.getter_setter.ext_builtin_types = types;
        }
        if let Some(prefix) = patch.member_prefix {
            self.getter_setter.member_prefix = prefix;
        }
        if let Some(pattern) = patch.header_guard_pattern {
            self.templates.guard_pattern = pattern;
        }
        if let Some(auto_create) = patch.auto_create_header_guard {
            self.auto_create_header_guard = auto_create;
        }
        if let Some(extension) = patch.class_creator_extension {
            if let Some(header) = extension.header {
                self.templates.header_extension = header;
            }
            if let Some(source) = extension.source {
                self.templates.source_extension = source;
            }
        }
        if let Some(template) = patch.class_creator_template {
            self.templates.class_template = template;
        }
        if let Some(template) = patch.unit_test_creator_template {
            self.templates.unit_test_template = template;
        }
        if let Some(region) = patch.region {
            if let Some(start) = region.start {
                self.templates.region_start = start;
            }
            if let Some(end) = region.end {
                self.templates.region_end = end;
            }
        }
        if let Some(mappings) = patch.header_source_mappings {
            self.navigation.header_source_mappings = mappings;
        }
        if let Some(languages) = patch.link_file_languages_ids {
            self.navigation.link_file_languages_ids = languages;
        }
        if let Some(strip) = patch.compile_commands_strip {
            self.compile_commands.apply_patch(strip);
        }
        if let Some(logging) = patch.logging {
            self.logging.apply_patch(logging);
        }
    }

    fn normalize(&mut self) {
        self.getter_setter.normalize();
        normalize_templates(&mut self.templates);
        self.navigation.normalize();
        self.compile_commands.normalize();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetterSetterSettings {
    /// Extra type names rendered by value in accessors.
    pub ext_builtin_types: Vec<String>,
    pub member_prefix: String,
}

impl Default for GetterSetterSettings {
    fn default() -> Self {
        Self {
            ext_builtin_types: Vec::new(),
            member_prefix: DEFAULT_MEMBER_PREFIX.to_string(),
        }
    }
}

impl GetterSetterSettings {
    fn normalize(&mut self) {
        self.ext_builtin_types = normalize_list(&self.ext_builtin_types);
        // An empty prefix is meaningful: names are used as declared.
        self.member_prefix = self.member_prefix.trim().to_string();
    }
}

fn normalize_templates(templates: &mut ScaffoldTemplates) {
    let defaults = ScaffoldTemplates::default();
    restore_if_blank(&mut templates.header_extension, &defaults.header_extension);
    restore_if_blank(&mut templates.source_extension, &defaults.source_extension);
    for extension in [&mut templates.header_extension, &mut templates.source_extension] {
        if !extension.starts_with('.') {
            extension.insert(0, '.');
        }
    }
    restore_if_blank(&mut templates.class_template, &defaults.class_template);
    restore_if_blank(&mut templates.unit_test_template, &defaults.unit_test_template);
    restore_if_blank(&mut templates.region_start, &defaults.region_start);
    restore_if_blank(&mut templates.region_end, &defaults.region_end);
    restore_if_blank(&mut templates.guard_pattern, &defaults.guard_pattern);
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationSettings {
    pub header_source_mappings: Vec<HeaderSourceMapping>,
    /// Language ids of documents scanned for build output links.
    pub link_file_languages_ids: Vec<String>,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            header_source_mappings: default_mappings(),
            link_file_languages_ids: vec!["Log".to_string()],
        }
    }
}

impl NavigationSettings {
    fn normalize(&mut self) {
        self.header_source_mappings.retain(|mapping| !mapping.header.is_empty() && !mapping.source.is_empty());
        if self.header_source_mappings.is_empty() {
            self.header_source_mappings = default_mappings();
        }
        self.link_file_languages_ids = normalize_list(&self.link_file_languages_ids);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompileCommandsSettings {
    pub enable: bool,
    /// Directory holding the generated database; may contain `${workspaceFolder}`.
    pub dir: String,
    pub output_dir: String,
    pub linux: Vec<StripRule>,
    pub windows: Vec<StripRule>,
}

impl Default for CompileCommandsSettings {
    fn default() -> Self {
        Self {
            enable: false,
            dir: "${workspaceFolder}/build".to_string(),
            output_dir: "${workspaceFolder}".to_string(),
            linux: Vec::new(),
            windows: Vec::new(),
        }
    }
}

impl CompileCommandsSettings {
    fn apply_patch(
        &mut self,
        patch: CompileCommandsSettingsPatch,
    ) {
        if let Some(enable) = patch.enable {
            self.enable = enable;
        }
        if let Some(dir) = patch.dir {
            self.dir = dir;
        }
        if let Some(output_dir) = patch.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(linux) = patch.linux {
            self.linux = linux;
        }
        if let Some(windows) = patch.windows {
            self.windows = windows;
        }
    }

    fn normalize(&mut self) {
        let defaults = Self::default();
        restore_if_blank(&mut self.dir, &defaults.dir);
        restore_if_blank(&mut self.output_dir, &defaults.output_dir);
        self.linux.retain(|rule| !rule.pattern.is_empty());
        self.windows.retain(|rule| !rule.pattern.is_empty());
    }

    /// Rules for `platform` (`linux` or `windows`).
    pub fn rules_for(
        &self,
        platform: &str,
    ) -> Option<&[StripRule]> {
        match platform {
            "linux" => Some(&self.linux),
            "windows" => Some(&self.windows),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoggingSettings {
    pub level: LoggingLevel,
}

impl LoggingSettings {
    fn apply_patch(
        &mut self,
        patch: LoggingSettingsPatch,
    ) {
        if let Some(level) = patch.level {
            self.level = level;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub fn allows_info(self) -> bool {
        self >= LoggingLevel::Info
    }
}

fn restore_if_blank(
    value: &mut String,
    default: &str,
) {
    if value.trim().is_empty() {
        *value = default.to_string();
    }
}

fn normalize_list(values: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty() && seen.insert(value.clone()))
        .collect()
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ServerSettingsPatch {
    getter_setter_ext_builtin_types: Option<Vec<String>>,
    member_prefix: Option<String>,
    header_guard_pattern: Option<String>,
    auto_create_header_guard: Option<bool>,
    class_creator_extension: Option<ClassExtensionPatch>,
    class_creator_template: Option<String>,
    unit_test_creator_template: Option<String>,
    region: Option<RegionPatch>,
    header_source_mappings: Option<Vec<HeaderSourceMapping>>,
    link_file_languages_ids: Option<Vec<String>>,
    compile_commands_strip: Option<CompileCommandsSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ClassExtensionPatch {
    header: Option<String>,
    source: Option<String>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RegionPatch {
    start: Option<String>,
    end: Option<String>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct CompileCommandsSettingsPatch {
    enable: Option<bool>,
    dir: Option<String>,
    output_dir: Option<String>,
    linux: Option<Vec<StripRule>>,
    windows: Option<Vec<StripRule>>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct LoggingSettingsPatch {
    level: Option<LoggingLevel>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

fn payload_candidates(payload: &Value) -> Vec<Value> {
    let mut candidates = Vec::new();
    candidates.push(payload.clone());

    if let Some(scoped) = payload.get(SETTINGS_SECTION_KEY) {
        candidates.push(scoped.clone());
    }

    candidates
}

#[cfg(test)]
#[path = "../../tests/src/server/settings_tests.rs"]
mod tests;
