//! Terminal chat client
//!
//! Collects user text, posts it with a bounded rolling conversation cache to
//! the backend chat endpoint, renders the exchange as a scrolling transcript,
//! and retries transient network failures.

use anyhow::{Context, Result};
use chat_tui::{App, Config};
use clap::{Arg, Command};
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("chat-tui")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal chat client for the chat backend")
        .arg(
            Arg::new("server")
                .short('s')
                .long("server")
                .value_name("URL")
                .help("Chat backend base URL (default: http://localhost:8000)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)"),
        )
        .get_matches();

    let config = Config::load(
        matches.get_one::<String>("config"),
        matches.get_one::<String>("server"),
        matches.get_one::<String>("log-level"),
    )?;
    config.validate()?;

    let _log_guard = init_tracing(&config)?;

    info!("Starting chat client");
    info!("Server: {}", config.server_url);

    let mut app = App::new(config)?;
    app.run().await?;

    info!("Chat client shutting down");
    Ok(())
}

/// Set up tracing. With file logging enabled the guard must stay alive for
/// the process lifetime; otherwise logs go to stderr, which the alternate
/// screen covers while the TUI runs.
fn init_tracing(config: &Config) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .context("Failed to create tracing filter")?;

    if config.logging.log_to_file {
        let path = config
            .logging
            .log_file
            .as_deref()
            .unwrap_or("chat-tui.log");
        let path = Path::new(path);
        let directory = path.parent().filter(|p| !p.as_os_str().is_empty());
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| "chat-tui.log".to_string());

        let appender =
            tracing_appender::rolling::never(directory.unwrap_or(Path::new(".")), file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(false),
            )
            .with(filter)
            .try_init()
            .context("Failed to initialize tracing")?;

        Ok(Some(guard))
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(filter)
            .try_init()
            .context("Failed to initialize tracing")?;

        Ok(None)
    }
}
