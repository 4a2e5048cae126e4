use std::{path::PathBuf, sync::Arc};

use tokio::sync::RwLock;
use tower_lsp::{Client, lsp_types::WorkspaceFolder};

use crate::{document::DocumentStore, server::settings::ServerSettings};

/// The cpp-helper backend that implements the Language Server Protocol.
pub struct CppHelperServer {
    /// The LSP client handle, used for messages and workspace edits.
    pub(crate) client: Client,

    /// Thread-safe store of all open documents.
    pub(crate) document_store: Arc<DocumentStore>,

    /// Workspace root folders, populated during `initialize`.
    pub(crate) workspace_roots: RwLock<Vec<WorkspaceFolder>>,

    /// Runtime server settings: defaults, then `cpphelper.toml`, then the client.
    pub(crate) settings: Arc<RwLock<ServerSettings>>,
}

impl CppHelperServer {
    /// Create a new `CppHelperServer` wired to the given LSP client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            document_store: Arc::new(DocumentStore::new()),
            workspace_roots: RwLock::new(Vec::new()),
            settings: Arc::new(RwLock::new(ServerSettings::default())),
        }
    }

    pub(crate) async fn settings_snapshot(&self) -> ServerSettings {
        self.settings.read().await.clone()
    }

    pub(crate) async fn apply_settings(
        &self,
        settings: ServerSettings,
    ) {
        *self.settings.write().await = settings;
    }

    pub(crate) async fn workspace_paths(&self) -> Vec<PathBuf> {
        self.workspace_roots.read().await.iter().filter_map(|folder| folder.uri.to_file_path().ok()).collect()
    }
}
