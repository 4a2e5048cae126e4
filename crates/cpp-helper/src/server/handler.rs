use std::{
    collections::HashMap,
    panic::AssertUnwindSafe,
    path::{Path, PathBuf},
};

use futures::FutureExt;
use tower_lsp::{LanguageServer, jsonrpc::Result, lsp_types::*};
use tracing::{debug, info, warn};

use crate::{
    files::{COMPILE_COMMANDS_FILE, is_header},
    generate::{amend_header_guard, create_header_guard, find_header_guard_lines, header_guard_name},
    output::build_output_links,
    server::{
        commands::{
            COMMANDS, CommandContext, compile_commands_paths, execute_command, strip_workspace_compile_commands,
        },
        project_config::resolve_project_config,
        settings::ServerSettings,
        state::CppHelperServer,
    },
};

const CLIENT_NOTIFICATION_PREFIX: &str = "cpp-helper:";
const COMPILE_COMMANDS_WATCHER_ID: &str = "cpphelper-compile-commands";
const HEADER_FILE_GLOB: &str = "**/*.{h,hpp,hh,h++}";
/// Output channels that always get build links, whatever their language id.
const BUILD_OUTPUT_MARKERS: [&str; 2] = ["cmake-tools", "cpphelper"];

#[tower_lsp::async_trait]
impl LanguageServer for CppHelperServer {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> Result<InitializeResult> {
        info!("Initializing cpp-helper...");

        if let Some(folders) = params.workspace_folders {
            *self.workspace_roots.write().await = folders;
        } else if let Some(root) = params.root_uri {
            *self.workspace_roots.write().await = vec![WorkspaceFolder {
                uri: root,
                name: "root".to_string(),
            }];
        }

        let mut settings = ServerSettings::default();
        let workspace_roots = self.workspace_paths().await;
        if let Some(root) = workspace_roots.first()
            && let Some((path, payload)) = resolve_project_config(root)
        {
            info!("Loaded project settings from {}", path.display());
            settings = settings.merged_with_payload(&payload);
        }
        if let Some(options) = params.initialization_options.as_ref() {
            settings = settings.merged_with_payload(options);
        }
        self.apply_settings(settings).await;

        let header_operations = FileOperationRegistrationOptions {
            filters: vec![FileOperationFilter {
                scheme: Some("file".to_string()),
                pattern: FileOperationPattern {
                    glob: HEADER_FILE_GLOB.to_string(),
                    matches: Some(FileOperationPatternKind::File),
                    options: None,
                },
            }],
        };

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: COMMANDS.iter().map(|command| command.to_string()).collect(),
                    work_done_progress_options: Default::default(),
                }),
                document_link_provider: Some(DocumentLinkOptions {
                    resolve_provider: Some(false),
                    work_done_progress_options: Default::default(),
                }),
                workspace: Some(WorkspaceServerCapabilities {
                    workspace_folders: None,
                    file_operations: Some(WorkspaceFileOperationsServerCapabilities {
                        did_create: Some(header_operations.clone()),
                        did_rename: Some(header_operations),
                        ..Default::default()
                    }),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "cpp-helper".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(
        &self,
        _: InitializedParams,
    ) {
        info!("cpp-helper initialized");

        let settings = self.settings_snapshot().await;
        if !settings.compile_commands.enable {
            return;
        }

        // Registration is a client request; do not hold up the notification on it.
        let client = self.client.clone();
        tokio::spawn(async move {
            let options = DidChangeWatchedFilesRegistrationOptions {
                watchers: vec![FileSystemWatcher {
                    glob_pattern: GlobPattern::String(format!("**/{COMPILE_COMMANDS_FILE}")),
                    kind: None,
                }],
            };
            let registration = Registration {
                id: COMPILE_COMMANDS_WATCHER_ID.to_string(),
                method: "workspace/didChangeWatchedFiles".to_string(),
                register_options: serde_json::to_value(options).ok(),
            };
            if let Err(error) = client.register_capability(vec![registration]).await {
                warn!("Failed to watch {COMPILE_COMMANDS_FILE}: {error}");
            }
        });
    }

    async fn did_change_configuration(
        &self,
        params: DidChangeConfigurationParams,
    ) {
        let current = self.settings_snapshot().await;
        let merged = current.merged_with_payload(&params.settings);
        if merged == current {
            return;
        }
        self.apply_settings(merged).await;
        info!("Applied updated cpp-helper settings");
    }

    async fn did_change_watched_files(
        &self,
        params: DidChangeWatchedFilesParams,
    ) {
        let settings = self.settings_snapshot().await;
        if !settings.compile_commands.enable {
            return;
        }
        let workspace_roots = self.workspace_paths().await;
        let Some(root) = workspace_roots.first() else {
            return;
        };
        let (src, _) = compile_commands_paths(&settings, root);
        let touched = params.changes.iter().any(|change| {
            change.typ != FileChangeType::DELETED && change.uri.to_file_path().is_ok_and(|path| path == src)
        });
        if !touched {
            return;
        }

        match strip_workspace_compile_commands(&settings, &workspace_roots) {
            Ok(Some(count)) => {
                self.log_to_client(&settings, format!("Stripped {count} compile commands")).await;
            },
            Ok(None) => {},
            Err(error) => {
                warn!("Compile commands stripping failed: {error}");
                self.client
                    .show_message(
                        MessageType::WARNING,
                        prefixed_client_message(format!("Compile commands stripping failed: {error}")),
                    )
                    .await;
            },
        }
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down cpp-helper");
        Ok(())
    }

    async fn did_open(
        &self,
        params: DidOpenTextDocumentParams,
    ) {
        let document = params.text_document;
        let filename = short_name(&document.uri);
        info!("Opened {filename} (v{}, {} bytes)", document.version, document.text.len());

        self.document_store.open(document.uri, document.language_id, document.text, document.version);
    }

    async fn did_change(
        &self,
        params: DidChangeTextDocumentParams,
    ) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        self.document_store.apply_changes(&uri, params.content_changes, version);
    }

    async fn did_close(
        &self,
        params: DidCloseTextDocumentParams,
    ) {
        self.document_store.close(&params.text_document.uri);
    }

    async fn did_create_files(
        &self,
        params: CreateFilesParams,
    ) {
        let settings = self.settings_snapshot().await;
        if !settings.auto_create_header_guard {
            return;
        }
        let mut changes = HashMap::new();
        for file in params.files {
            let Ok(uri) = Url::parse(&file.uri) else {
                continue;
            };
            let Some((path, text)) = self.header_text(&uri) else {
                continue;
            };
            if find_header_guard_lines(&text).is_some() {
                continue;
            }
            let guard = guard_for(&path, &settings);
            changes.insert(uri, create_header_guard(&text, &guard));
        }
        self.apply_header_guard_edits(changes).await;
    }

    async fn did_rename_files(
        &self,
        params: RenameFilesParams,
    ) {
        let settings = self.settings_snapshot().await;
        if !settings.auto_create_header_guard {
            return;
        }
        let mut changes = HashMap::new();
        for file in params.files {
            let Ok(uri) = Url::parse(&file.new_uri) else {
                continue;
            };
            let Some((path, text)) = self.header_text(&uri) else {
                continue;
            };
            let guard = guard_for(&path, &settings);
            changes.insert(uri, amend_header_guard(&text, &guard));
        }
        self.apply_header_guard_edits(changes).await;
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        let settings = self.settings_snapshot().await;
        let workspace_roots = self.workspace_paths().await;
        let ctx = CommandContext {
            settings: &settings,
            documents: &self.document_store,
            workspace_roots: &workspace_roots,
        };

        let outcome = match execute_command(&params.command, params.arguments, &ctx) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!("{} failed: {error}", params.command);
                return Err(error.into());
            },
        };
        if let Some(warning) = outcome.warning {
            let _ = AssertUnwindSafe(self.client.show_message(MessageType::WARNING, prefixed_client_message(warning)))
                .catch_unwind()
                .await;
        }
        Ok(outcome.result)
    }

    async fn document_link(
        &self,
        params: DocumentLinkParams,
    ) -> Result<Option<Vec<DocumentLink>>> {
        let uri = params.text_document.uri;
        let Some(document) = self.document_store.get(&uri) else {
            return Ok(None);
        };
        let settings = self.settings_snapshot().await;
        let is_build_output = settings.navigation.link_file_languages_ids.contains(&document.language_id)
            || BUILD_OUTPUT_MARKERS.iter().any(|marker| uri.as_str().contains(marker));
        if !is_build_output {
            return Ok(None);
        }
        let Some(root) = self.workspace_paths().await.into_iter().next() else {
            return Ok(None);
        };

        let links = build_output_links(&document.text, &root);
        debug!("Found {} build output links in {}", links.len(), short_name(&uri));
        Ok(Some(links))
    }
}

impl CppHelperServer {
    /// Path and current text of a header, from the store or from disk.
    fn header_text(
        &self,
        uri: &Url,
    ) -> Option<(PathBuf, String)> {
        let path = uri.to_file_path().ok()?;
        if !is_header(&path) {
            return None;
        }
        let text = match self.document_store.get_content(uri) {
            Some(text) => text,
            None => std::fs::read_to_string(&path)
                .inspect_err(|error| warn!("Cannot read {}: {error}", path.display()))
                .ok()?,
        };
        Some((path, text))
    }

    async fn apply_header_guard_edits(
        &self,
        changes: HashMap<Url, Vec<TextEdit>>,
    ) {
        if changes.is_empty() {
            return;
        }
        let edit = WorkspaceEdit {
            changes: Some(changes),
            ..Default::default()
        };
        match self.client.apply_edit(edit).await {
            Ok(response) if !response.applied => {
                warn!("Client rejected header guard edit: {:?}", response.failure_reason);
            },
            Ok(_) => {},
            Err(error) => warn!("Failed to apply header guard edit: {error}"),
        }
    }

    async fn log_to_client(
        &self,
        settings: &ServerSettings,
        message: String,
    ) {
        info!("{message}");
        if settings.logging.level.allows_info() {
            let _ = AssertUnwindSafe(self.client.log_message(MessageType::INFO, prefixed_client_message(message)))
                .catch_unwind()
                .await;
        }
    }
}

fn guard_for(
    path: &Path,
    settings: &ServerSettings,
) -> String {
    let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or_default();
    header_guard_name(file_name, &settings.templates.guard_pattern)
}

fn short_name(uri: &Url) -> String {
    uri.path().rsplit('/').next().unwrap_or(uri.path()).to_owned()
}

fn prefixed_client_message(message: impl AsRef<str>) -> String {
    format!("{CLIENT_NOTIFICATION_PREFIX} {}", message.as_ref())
}
