//! commitgen - CLI entry point.
//!
//! A terminal presentation surface for the request coordinator: each
//! subcommand maps onto one surface command, and the four signal variants
//! are rendered as plain terminal output.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commitgen::clipboard::SystemClipboard;
use commitgen::coordinator::SignalSink;
use commitgen::git::check_git_installed;
use commitgen::git::commit::GitCommitter;
use commitgen::git::diff::GitDiff;
use commitgen::{GenerationClient, RequestCoordinator, Session, Signal, SurfaceCommand};

/// Generate a commit message from unstaged changes using a remote AI backend.
#[derive(Parser, Debug)]
#[command(name = "commitgen")]
#[command(about = "Generate a commit message from unstaged changes")]
#[command(version)]
struct Cli {
    /// Repository root to operate on (defaults to the current directory)
    #[arg(short = 'C', long, value_name = "DIR", global = true)]
    workspace: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Collect the diff, generate a message, and print it
    Generate {
        /// Also copy the generated message to the clipboard
        #[arg(long)]
        copy: bool,

        /// Also stage all changes and commit with the generated message
        #[arg(long)]
        commit: bool,
    },
    /// Copy text to the clipboard (from the argument, or stdin if omitted)
    Copy { text: Option<String> },
    /// Stage all changes and commit (message from the argument, or stdin)
    Commit { message: Option<String> },
}

/// Renders signals to the terminal: generated text on stdout, notices and
/// errors on stderr. Remembers the last shown message so `generate
/// --copy/--commit` can chain follow-up commands.
#[derive(Default)]
struct TerminalSurface {
    last_shown: Mutex<Option<String>>,
    saw_error: AtomicBool,
}

impl TerminalSurface {
    fn last_shown(&self) -> Option<String> {
        self.last_shown.lock().ok()?.clone()
    }
}

impl SignalSink for TerminalSurface {
    fn post(&self, signal: Signal) {
        match signal {
            Signal::Loading => eprintln!("Generating..."),
            Signal::Show { text } => {
                println!("{text}");
                if let Ok(mut last) = self.last_shown.lock() {
                    *last = Some(text);
                }
            }
            Signal::Info { text } => eprintln!("{text}"),
            Signal::Error { text } => {
                self.saw_error.store(true, Ordering::SeqCst);
                eprintln!("Error: {text}");
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    check_git_installed().await.context("git is required")?;

    let workspace = match cli.workspace {
        Some(dir) => Some(dir),
        None => std::env::current_dir().ok(),
    };
    let session = Session::new(workspace);

    let generation_client = GenerationClient::new().context("Failed to build HTTP client")?;
    let coordinator =
        RequestCoordinator::new(GitDiff, generation_client, GitCommitter, SystemClipboard);
    let surface = TerminalSurface::default();

    match cli.command {
        CliCommand::Generate { copy, commit } => {
            coordinator
                .handle(&session, SurfaceCommand::Generate, &surface)
                .await;

            if let Some(text) = surface.last_shown() {
                if copy {
                    coordinator
                        .handle(&session, SurfaceCommand::Copy { text: text.clone() }, &surface)
                        .await;
                }
                if commit {
                    coordinator
                        .handle(&session, SurfaceCommand::Commit { text }, &surface)
                        .await;
                }
            }
        }
        CliCommand::Copy { text } => {
            let text = text_or_stdin(text).context("Failed to read text to copy")?;
            coordinator
                .handle(&session, SurfaceCommand::Copy { text }, &surface)
                .await;
        }
        CliCommand::Commit { message } => {
            let text = text_or_stdin(message).context("Failed to read commit message")?;
            coordinator
                .handle(&session, SurfaceCommand::Commit { text }, &surface)
                .await;
        }
    }

    if surface.saw_error.load(Ordering::SeqCst) {
        std::process::exit(1);
    }

    Ok(())
}

/// Use the given text, or read all of stdin when it is absent.
fn text_or_stdin(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
