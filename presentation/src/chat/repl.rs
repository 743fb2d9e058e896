//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::{OutputConfig, ReplConfig};
use crate::output::console::ConsoleFormatter;
use crate::output::formatter::{TranscriptFormatter, formatter_for};
use chatwire_application::{ChatSessionController, SubmitOutcome};
use chatwire_domain::{OutputFormat, Transcript};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::io;
use std::path::Path;
use tracing::{debug, warn};

const HISTORY_CAPACITY: usize = 1000;

/// Slash commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Transcript,
    Export(Option<String>),
    New,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`.
    pub fn parse(line: &str) -> Self {
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        match name {
            "/help" | "/h" | "/?" => Self::Help,
            "/transcript" | "/t" => Self::Transcript,
            "/export" => Self::Export(arg),
            "/new" | "/reset" => Self::New,
            "/quit" | "/exit" | "/q" => Self::Quit,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// What a line typed at the prompt asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput<'a> {
    Blank,
    Command(ReplCommand),
    /// Chat message, exactly as typed
    Message(&'a str),
}

impl<'a> ReplInput<'a> {
    /// Route a line. Only blank and command detection look at the trimmed
    /// form; messages keep their surrounding whitespace.
    pub fn route(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Self::Blank
        } else if trimmed.starts_with('/') {
            Self::Command(ReplCommand::parse(trimmed))
        } else {
            Self::Message(line)
        }
    }
}

/// Write a transcript to `path`, picking the format from its extension.
///
/// Unknown extensions fall back to the configured output format. Terminal
/// exports are written without color codes.
pub fn export_transcript(
    transcript: &Transcript,
    path: &Path,
    output: &OutputConfig,
) -> io::Result<OutputFormat> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(OutputFormat::from_extension)
        .unwrap_or(output.format);

    let config = OutputConfig {
        color: false,
        ..output.clone()
    };
    let mut content = formatter_for(format, &config).format_transcript(transcript);
    if !content.ends_with('\n') {
        content.push('\n');
    }

    std::fs::write(path, content)?;
    Ok(format)
}

/// Interactive chat REPL
pub struct ChatRepl {
    controller: ChatSessionController,
    console: ConsoleFormatter,
    output: OutputConfig,
    repl: ReplConfig,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(controller: ChatSessionController, output: OutputConfig, repl: ReplConfig) -> Self {
        Self {
            console: ConsoleFormatter::new(output.color),
            controller,
            output,
            repl,
        }
    }

    fn line_editor(&self) -> Reedline {
        let editor = Reedline::create();

        let Some(path) = self.repl.history_path() else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }

        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("History disabled ({}): {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> io::Result<()> {
        let mut line_editor = self.line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("chat".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match line_editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    if self.handle_line(&line).await {
                        break;
                    }
                }
                Signal::CtrlC => {
                    // Line was cleared by the editor
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        self.controller.close();
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("chatwire - type /help for commands, Ctrl-D to exit");
        println!();
        if let Some(greeting) = self.controller.transcript().messages().first() {
            println!("{}", self.console.format_message(greeting));
        }
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /help, /h, /?       - Show this help");
        println!("  /transcript, /t     - Show the conversation so far");
        println!("  /export <path>      - Save the conversation (.html, .json or .txt)");
        println!("  /new                - Start a new conversation");
        println!("  /quit, /exit, /q    - Exit chat");
        println!();
        println!("Ctrl-C cancels a pending reply.");
        println!();
    }

    /// Handle one submitted line. Returns true if should exit.
    async fn handle_line(&mut self, line: &str) -> bool {
        match ReplInput::route(line) {
            ReplInput::Blank => false,
            ReplInput::Command(command) => self.handle_command(command),
            ReplInput::Message(text) => {
                self.send(text).await;
                false
            }
        }
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => self.print_help(),
            ReplCommand::Transcript => {
                println!();
                println!(
                    "{}",
                    self.console.format_transcript(&self.controller.transcript())
                );
                println!();
            }
            ReplCommand::Export(None) => {
                println!("Usage: /export <path>");
            }
            ReplCommand::Export(Some(path)) => {
                let path = Path::new(&path);
                match export_transcript(&self.controller.transcript(), path, &self.output) {
                    Ok(format) => {
                        debug!("Exported transcript as {:?}", format);
                        println!("Saved conversation to {}", path.display());
                    }
                    Err(e) => eprintln!("Error: could not write {}: {}", path.display(), e),
                }
            }
            ReplCommand::New => {
                self.controller = self.controller.restart();
                println!("{}", self.console.notice("(new conversation)"));
                self.print_welcome();
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    async fn send(&self, line: &str) {
        let cancel = self.controller.session_token().child_token();
        let submit = self.controller.submit_with_cancel(line, cancel.clone());
        tokio::pin!(submit);

        let outcome = tokio::select! {
            outcome = &mut submit => outcome,
            _ = tokio::signal::ctrl_c() => {
                cancel.cancel();
                submit.await
            }
        };

        match outcome {
            SubmitOutcome::Replied(message) => {
                println!("{}", self.console.format_message(&message));
                println!();
            }
            SubmitOutcome::Cancelled => println!("{}", self.console.notice("(cancelled)")),
            SubmitOutcome::Failed(_) => println!("{}", self.console.notice("(no reply)")),
            SubmitOutcome::Busy => {
                println!("{}", self.console.notice("(still waiting for a reply)"))
            }
            SubmitOutcome::Closed => println!("{}", self.console.notice("(session closed)")),
            SubmitOutcome::Ignored => {}
        }
    }
}
