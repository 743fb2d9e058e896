//! CLI command definitions

use chatwire_domain::OutputFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for one-shot replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Styled terminal text
    Terminal,
    /// Standalone HTML page of the transcript
    Html,
    /// JSON array of messages
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Html => OutputFormat::Html,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for chatwire
#[derive(Parser, Debug)]
#[command(name = "chatwire")]
#[command(author, version, about = "Terminal chat client for a remote chat endpoint")]
#[command(long_about = r#"
chatwire sends your messages to a chat endpoint and renders the replies.

Without a MESSAGE an interactive session starts. With a MESSAGE the reply is
printed once and the process exits (non-zero if the request failed).

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./chatwire.toml     Project-level config (or ./.chatwire.toml)
3. ~/.config/chatwire/config.toml   Global config

Environment variables prefixed with CHATWIRE_ override file settings,
e.g. CHATWIRE_ENDPOINT__URL=http://localhost:5000/chat

Example:
  chatwire "How do I reset my password?"
  chatwire --endpoint http://localhost:8080/chat -o html "hi" > chat.html
  chatwire --escape-html
"#)]
pub struct Cli {
    /// Message to send (starts an interactive session when omitted)
    pub message: Option<String>,

    /// Chat endpoint URL
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// HTML-escape reply text before rendering markup
    #[arg(long)]
    pub escape_html: bool,

    /// Output format for one-shot mode
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormatArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the typing indicator
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
