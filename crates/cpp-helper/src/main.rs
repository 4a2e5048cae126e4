use std::path::{Path, PathBuf};

use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing::info;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cpp_helper::CppHelperServer;

const LOG_FILE_NAME: &str = "cpp-helper.log";

#[derive(Parser, Debug)]
#[command(name = "cpp-helper", version, about)]
struct Args {
    /// Log at debug level, including tower-lsp traffic.
    #[arg(long, short)]
    verbose: bool,

    /// Log file path. Defaults to `~/.cpp-helper/cpp-helper.log`.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    /// `RUST_LOG` wins over the `--verbose` switch.
    fn filter(
        &self,
        quiet_transport: &str,
    ) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let (own, transport) = if self.verbose { ("debug", "debug") } else { ("info", quiet_transport) };
            EnvFilter::new(format!("cpp_helper={own},tower_lsp={transport}"))
        })
    }

    fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| log_dir().join(LOG_FILE_NAME))
    }
}

/// `~/.cpp-helper` when it can be created, else the temp dir.
fn log_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".cpp-helper"))
        .filter(|dir| std::fs::create_dir_all(dir).is_ok())
        .unwrap_or_else(std::env::temp_dir)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let log_path = args.log_path();

    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(Path::new(".")),
        log_path.file_name().unwrap_or(LOG_FILE_NAME.as_ref()),
    );
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(false)
        .with_filter(args.filter("warn"));
    // stdout carries the protocol, so console logs go to stderr.
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(args.filter("error"));

    tracing_subscriber::registry().with(file_layer).with(stderr_layer).init();

    info!("cpp-helper v{} logging to {}", env!("CARGO_PKG_VERSION"), log_path.display());

    let (service, socket) = LspService::new(CppHelperServer::new);
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket).serve(service).await;

    info!("cpp-helper stopped");
}
