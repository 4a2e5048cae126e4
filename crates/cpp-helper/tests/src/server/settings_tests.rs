use serde_json::json;

use super::*;

#[test]
fn parses_namespaced_payload() {
    let payload = json!({
        "cpphelper": {
            "getterSetterExtBuiltinTypes": ["QString", " Handle "],
            "memberPrefix": "_",
            "headerGuardPattern": "PROJECT_{FILE}_H",
            "autoCreateHeaderGuard": true,
            "classCreatorExtension": {
                "header": ".h",
                "source": "cc"
            },
            "region": {
                "start": "// region",
                "end": "// endregion"
            },
            "linkFileLanguagesIds": ["Log", "plaintext"],
            "compileCommandsStrip": {
                "enable": true,
                "dir": "${workspaceFolder}/out",
                "linux": [{ "match": "-fmodules-ts", "replace": "" }]
            },
            "logging": {
                "level": "debug"
            }
        }
    });

    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert_eq!(settings.getter_setter.ext_builtin_types, vec!["QString", "Handle"]);
    assert_eq!(settings.getter_setter.member_prefix, "_");
    assert_eq!(settings.templates.guard_pattern, "PROJECT_{FILE}_H");
    assert!(settings.auto_create_header_guard);
    assert_eq!(settings.templates.header_extension, ".h");
    assert_eq!(settings.templates.source_extension, ".cc");
    assert_eq!(settings.templates.region_start, "// region");
    assert_eq!(settings.templates.region_end, "// endregion");
    assert_eq!(settings.navigation.link_file_languages_ids, vec!["Log", "plaintext"]);
    assert!(settings.compile_commands.enable);
    assert_eq!(settings.compile_commands.dir, "${workspaceFolder}/out");
    assert_eq!(settings.compile_commands.linux.len(), 1);
    assert_eq!(settings.compile_commands.linux[0].pattern, "-fmodules-ts");
    assert_eq!(settings.logging.level, LoggingLevel::Debug);
}

#[test]
fn parses_direct_payload() {
    let payload = json!({
        "memberPrefix": "",
        "classCreatorTemplate": "class ${className} {};",
        "unitTestCreatorTemplate": "TEST(${fileName}, Works) {}"
    });

    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert_eq!(settings.getter_setter.member_prefix, "");
    assert_eq!(settings.templates.class_template, "class ${className} {};");
    assert_eq!(settings.templates.unit_test_template, "TEST(${fileName}, Works) {}");
    assert_eq!(settings.templates.header_extension, ".hpp");
}

#[test]
fn defaults_without_payload() {
    let settings = ServerSettings::from_lsp_payload(None);
    assert_eq!(settings, ServerSettings::default());
    assert_eq!(settings.getter_setter.member_prefix, "m_");
    assert!(!settings.auto_create_header_guard);
    assert!(!settings.compile_commands.enable);
    assert_eq!(settings.navigation.header_source_mappings, default_mappings());
    assert!(settings.logging.level.allows_info());
}

#[test]
fn blank_values_restore_defaults() {
    let payload = json!({
        "headerGuardPattern": "  ",
        "classCreatorExtension": { "header": "" },
        "region": { "start": "" },
        "headerSourceMappings": [],
        "compileCommandsStrip": { "dir": "", "windows": [{ "match": "" }] }
    });

    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    let defaults = ServerSettings::default();
    assert_eq!(settings.templates.guard_pattern, defaults.templates.guard_pattern);
    assert_eq!(settings.templates.header_extension, ".hpp");
    assert_eq!(settings.templates.region_start, "#pragma region");
    assert_eq!(settings.navigation.header_source_mappings, default_mappings());
    assert_eq!(settings.compile_commands.dir, defaults.compile_commands.dir);
    assert!(settings.compile_commands.windows.is_empty());
}

#[test]
fn merge_keeps_previous_values_for_missing_keys() {
    let first = ServerSettings::from_lsp_payload(Some(&json!({ "memberPrefix": "my_" })));
    let second = first.merged_with_payload(&json!({ "autoCreateHeaderGuard": true }));

    assert_eq!(second.getter_setter.member_prefix, "my_");
    assert!(second.auto_create_header_guard);
}

#[test]
fn ignores_invalid_types_and_unknown_keys() {
    let payload = json!({
        "memberPrefix": 42,
        "somethingElse": { "nested": true }
    });

    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert_eq!(settings.getter_setter.member_prefix, "m_");
}

#[test]
fn dedups_link_languages() {
    let payload = json!({ "linkFileLanguagesIds": ["Log", " Log ", ""] });

    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert_eq!(settings.navigation.link_file_languages_ids, vec!["Log"]);
}

#[test]
fn rules_for_platform() {
    let payload = json!({
        "compileCommandsStrip": {
            "windows": [{ "match": "/std:c\\+\\+latest", "replace": "/std:c++20" }]
        }
    });

    let settings = ServerSettings::from_lsp_payload(Some(&payload));
    assert_eq!(settings.compile_commands.rules_for("windows").map(<[_]>::len), Some(1));
    assert_eq!(settings.compile_commands.rules_for("linux").map(<[_]>::len), Some(0));
    assert!(settings.compile_commands.rules_for("macos").is_none());
}

#[test]
fn logging_level_ordering() {
    assert!(!LoggingLevel::Error.allows_info());
    assert!(!LoggingLevel::Warn.allows_info());
    assert!(LoggingLevel::Trace.allows_info());
}
