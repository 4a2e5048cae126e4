pub(crate) mod commands;
pub(crate) mod handler;
pub(crate) mod project_config;
pub mod settings;
pub(crate) mod state;

pub use settings::ServerSettings;
pub use state::CppHelperServer;
