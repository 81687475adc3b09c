pub mod commands;
pub mod config;
pub mod error;
pub mod prompt;
pub mod server;
pub mod tui;
pub mod util;

// === CLI entrypoint ===
pub mod cli;

/// Entrypoint used by `main.rs` and tests to run the full CLI.
pub async fn run_cli() -> anyhow::Result<()> {
    cli::cli().await
}
