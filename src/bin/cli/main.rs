mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hanzi_reader::ReaderConfig;

#[derive(Parser)]
#[command(name = "hanzi", about = "Chinese dictionary lookups and vocabulary review", version)]
struct Cli {
    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Look up a word (simplified or traditional)
    Lookup {
        word: String,
    },

    /// Split text into words and look each one up
    Read {
        /// Text to read (use "-" to read from stdin)
        text: Option<String>,
    },

    /// Save a word for review, or remove it if already saved
    Save {
        word: String,
    },

    /// List saved words
    Saved {
        /// Oldest first instead of newest first
        #[arg(long)]
        oldest: bool,
    },

    /// Review saved words interactively
    Review {
        /// Maximum words in the session (defaults to the config value)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show how many saved words are new, due and scheduled
    Stats,

    /// Build the dictionary index from the CC-CEDICT file
    Import {
        /// Rebuild even if the index already exists
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration
    Config {
        /// Write the defaults to the config file if it does not exist
        #[arg(long)]
        init: bool,
    },
}

/// Read content from stdin if piped, or resolve "-" as stdin
fn resolve_content(content: Option<String>) -> Option<String> {
    match content.as_deref() {
        Some("-") => {
            let mut buf = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf).ok();
            Some(buf)
        }
        Some(_) => content,
        None => {
            if !stdin_is_tty() {
                let mut buf = String::new();
                std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf).ok();
                if buf.is_empty() { None } else { Some(buf) }
            } else {
                None
            }
        }
    }
}

fn stdin_is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stdin())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ReaderConfig::load(cli.config.as_deref())?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    let use_color = !cli.no_color && std::io::IsTerminal::is_terminal(&std::io::stdout());

    match cli.command {
        Command::Lookup { word } => {
            let app = app::App::new(config)?;
            commands::lookup::run(&app, &word, &cli.format, use_color)?;
        }
        Command::Read { text } => {
            let text = resolve_content(text).ok_or_else(|| {
                anyhow::anyhow!("No text given. Pass it as an argument or pipe it in.")
            })?;
            let app = app::App::new(config)?;
            commands::read::run(&app, &text, &cli.format, use_color)?;
        }
        Command::Save { word } => {
            let app = app::App::new(config)?;
            commands::save::run(&app, &word, &cli.format, use_color)?;
        }
        Command::Saved { oldest } => {
            let app = app::App::new(config)?;
            commands::saved::run(&app, oldest, &cli.format, use_color)?;
        }
        Command::Review { limit } => {
            let app = app::App::new(config)?;
            let limit = limit.unwrap_or(app.config.review_limit);
            commands::review::run(&app, limit, use_color)?;
        }
        Command::Stats => {
            let app = app::App::new(config)?;
            commands::stats::run(&app, &cli.format)?;
        }
        Command::Import { force } => {
            commands::import::run(&config, force, &cli.format)?;
        }
        Command::Config { init } => {
            commands::config::run(&config, cli.config.as_deref(), init, &cli.format)?;
        }
    }

    Ok(())
}
