use std::path::PathBuf;

use anyhow::Context;

use scancheck_cli::{AppConfig, ScanSession, TerminalPresenter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    scancheck_observability::init(&config.log);

    let files: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();

    let presenter = TerminalPresenter::new(std::io::stdout());
    let mut session = ScanSession::new(presenter, config.default_quantity);

    if !files.is_empty() {
        let summary = session.load_files(files).await;
        tracing::info!(loaded = summary.loaded, rejected = summary.rejected, "initial files loaded");
    }
    session
        .presenter_mut()
        .notice("Ready. Scan a code, or type :help.");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    scancheck_cli::run(&mut session, stdin)
        .await
        .context("failed to read operator input")?;

    Ok(())
}
