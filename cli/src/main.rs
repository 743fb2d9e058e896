//! CLI entrypoint for chatwire
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use chatwire_application::ChatSessionController;
use chatwire_domain::OutputFormat;
use chatwire_infrastructure::{ConfigLoader, FileConfig, HttpChatEndpoint, JsonlConversationLogger};
use chatwire_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, ReplConfig, TranscriptFormatter,
    TypingIndicator, formatter_for, send_once,
};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_cli_overrides(&mut config, &cli);

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_tracing(cli.verbose, config.logging.log_file())?;

    info!("Starting chatwire");

    for issue in config.check()? {
        warn!("{}", issue.message);
    }

    // === Dependency Injection ===
    let endpoint = HttpChatEndpoint::from_config(&config.endpoint)?;
    info!("Chat endpoint: {}", endpoint.url());

    let mut controller = ChatSessionController::new(Arc::new(endpoint), config.session_config());

    if config.repl.show_typing && !cli.quiet {
        controller = controller.with_observer(Arc::new(TypingIndicator::new()));
    }

    if let Some(path) = config.logging.conversation_log_file() {
        match JsonlConversationLogger::open(path) {
            Some(logger) => controller = controller.with_conversation_logger(Arc::new(logger)),
            None => warn!("Conversation log disabled: cannot open {}", path),
        }
    }

    let output = OutputConfig {
        format: cli
            .output
            .map(OutputFormat::from)
            .or(config.output.format)
            .unwrap_or_default(),
        color: config.output.color && !cli.no_color,
        escape_user_text: config.chat.escape_html,
    };

    // One-shot mode
    if let Some(message) = cli.message.as_deref() {
        let transcript = send_once(&controller, message).await?;

        let rendered = match output.format {
            OutputFormat::Terminal => transcript
                .last()
                .map(|reply| ConsoleFormatter::new(output.color).render_fragment(reply.text()))
                .unwrap_or_default(),
            format => formatter_for(format, &output).format_transcript(&transcript),
        };
        println!("{}", rendered.trim_end());
        return Ok(());
    }

    // Interactive mode
    let repl_config = ReplConfig {
        history_file: config.repl.history_file.clone(),
    };
    ChatRepl::new(controller, output, repl_config).run().await?;

    Ok(())
}

fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(url) = &cli.endpoint {
        config.endpoint.url = url.clone();
    }
    if let Some(secs) = cli.timeout {
        config.endpoint.timeout_secs = Some(secs);
    }
    if cli.escape_html {
        config.chat.escape_html = true;
    }
}

/// Install the tracing subscriber.
///
/// `-v` flags pick the level; without them `RUST_LOG` is honored and the
/// default is `warn`. With a log file configured, output goes there instead
/// of stderr.
fn init_tracing(verbose: u8, log_file: Option<&str>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(log_file) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let path = Path::new(log_file);
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("Invalid log file path: {}", log_file))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}
