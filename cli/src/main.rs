use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};
use mural_cli::config::{self, Settings, DEFAULT_CONFIG_FILE};
use mural_cli::{prompt, render, Screen, ScreenError, UreqTransport};
use mural_core::{MessageId, MuralClient, OrderMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mural", about = "Read and write the public message board")]
struct Cli {
    /// Config file with `api_url` and `order`.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Base URL of the message store (without `/recados`).
    #[arg(long, env = "MURAL_API_URL")]
    api_url: Option<String>,
    /// newest-first, oldest-first or alphabetical-by-author.
    #[arg(long, env = "MURAL_ORDER")]
    order: Option<OrderMode>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the board.
    List,
    /// Publish a message, then show the board.
    Post {
        #[arg(long)]
        author: String,
        #[arg(long)]
        message: String,
    },
    /// Delete a message by id, then show the board.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ScreenError>() {
                Some(alert) => {
                    tracing::error!(error = ?err, "action failed");
                    eprintln!("{alert}");
                }
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let file = config::load_file(&cli.config)?;
    let Settings { api_url, order } = config::resolve(file, cli.api_url, cli.order)?;
    tracing::debug!(%api_url, %order, "settings resolved");

    let mut screen = Screen::new(MuralClient::new(&api_url), UreqTransport::new(), order);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::List => {
            screen.refresh()?;
        }
        Command::Post { author, message } => {
            screen.publish(&author, &message)?;
            writeln!(out, "Message published.")?;
            screen.refresh()?;
        }
        Command::Delete { id, yes } => {
            let id = MessageId::parse(&id);
            screen.refresh()?;
            let question = format!("Delete message {id}? This cannot be undone.");
            if !yes && !prompt::confirm(&question, &mut io::stdin().lock(), &mut out)? {
                writeln!(out, "Cancelled.")?;
                return Ok(());
            }
            screen.delete(&id)?;
            writeln!(out, "Message deleted.")?;
        }
    }

    writeln!(out)?;
    render::write_board(&mut out, screen.board(), &Local)?;
    Ok(())
}
