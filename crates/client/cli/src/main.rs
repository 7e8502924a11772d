//! Character build script runner.
//!
//! Usage: `chargen [SCRIPT]`. Reads the script from the given file, or from
//! stdin when no path is given. Exits non-zero if any command is rejected.
mod app;
mod config;
mod script;

use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};
use app::{ScriptRunner, bootstrap};
use config::CliConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = CliConfig::from_env();
    let source = read_script(std::env::args().nth(1))?;
    let commands = script::parse_script(&source)?;

    let (runtime, handle) = bootstrap(&config).await?;
    tracing::info!(character = %handle.id(), commands = commands.len(), "running script");

    let mut runner = ScriptRunner::new(handle, std::io::stdout().lock());
    let report = runner.run(commands).await?;
    drop(runner);
    runtime.shutdown().await?;

    tracing::info!(
        committed = report.committed,
        failed = report.failed,
        "script finished"
    );

    Ok(if report.failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_script(path: Option<String>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read script {path}")),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read script from stdin")?;
            Ok(source)
        }
    }
}
