use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use chatlead::cli::{extract, import, parse};
use chatlead::config::{Config, OutputFormat};

#[derive(Parser)]
#[command(name = "chatlead")]
#[command(about = "Contact and relationship-context extraction from exported chat logs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "chatlead.yaml", global = true)]
    config: String,

    /// Output format (overrides config)
    #[arg(short, long, global = true)]
    format: Option<Format>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::Text => OutputFormat::Text,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a chat export and list its messages
    Parse {
        /// WhatsApp text export
        file: PathBuf,
    },

    /// Extract contacts and their context from a chat export
    Extract {
        /// WhatsApp text export
        file: PathBuf,

        /// Messages of context on each side of a match
        #[arg(short, long)]
        window: Option<usize>,
    },

    /// Prepare extracted contacts for import
    Import {
        /// WhatsApp text export
        file: PathBuf,

        /// Messages of context on each side of a match
        #[arg(short, long)]
        window: Option<usize>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load config
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        warn!("Ignoring config {}: {}", cli.config, e);
        Config::default()
    });

    let format = cli.format.map(Into::into).unwrap_or(config.output.format);

    match cli.command {
        Commands::Parse { file } => {
            parse::run(&file, format)?;
        }
        Commands::Extract { file, window } => {
            let window = window.unwrap_or(config.extraction.window_size);
            extract::run(&file, &config, window, format)?;
        }
        Commands::Import { file, window } => {
            let window = window.unwrap_or(config.extraction.window_size);
            import::run(&file, &config, window, format)?;
        }
    }

    Ok(())
}
