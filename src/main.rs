use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use pheed::config::{find_config_file, get_config, load_config, Config, LogFormat};
use pheed::sources::aps::{ApsSource, ApsWebClient, JournalClient, JOURNALS};
use pheed::sources::{Source, SourceOptions};
use pheed::utils::{render_articles, render_journals};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pheed - Fetch recent articles from scholarly journals
#[derive(Parser, Debug)]
#[command(name = "pheed")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch recent articles from scholarly journals", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the configuration)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

impl From<OutputFormat> for pheed::utils::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Auto => Self::Auto,
            OutputFormat::Table => Self::Table,
            OutputFormat::Json => Self::Json,
            OutputFormat::Plain => Self::Plain,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List known APS journals
    #[command(alias = "ls")]
    Journals,

    /// Show the articles of a journal's latest issue
    #[command(alias = "r")]
    Recent {
        /// Journal identifier (default: aps.default_journal from the configuration)
        journal: Option<String>,
    },

    /// Search a journal
    #[command(alias = "s")]
    Search {
        /// Journal identifier
        journal: String,

        /// Search option as key=value (repeatable)
        #[arg(long = "option", short = 'O', value_parser = parse_option)]
        options: Vec<(String, String)>,
    },

    /// Print the effective configuration
    Config,
}

fn parse_option(pair: &str) -> Result<(String, String), String> {
    SourceOptions::parse_pair(pair).map_err(|e| e.to_string())
}

fn init_tracing(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("pheed={}", level)),
    );
    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn build_client(cli: &Cli, config: &Config) -> Result<Arc<dyn JournalClient>> {
    let mut http = config.http.clone();
    if let Some(timeout) = cli.timeout {
        http.timeout_seconds = timeout;
    }

    let client = ApsWebClient::from_config(&http, &config.aps)
        .context("Failed to create APS client")?;
    Ok(Arc::new(client))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let config = match &config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => get_config()?,
    };

    init_tracing(&cli, &config);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    let format = pheed::utils::OutputFormat::from(cli.output);
    let is_terminal = std::io::stdout().is_terminal();

    match &cli.command {
        Commands::Journals => {
            let out = render_journals(&JOURNALS, ApsSource::CAPABILITIES, format, is_terminal)?;
            println!("{}", out);
        }
        Commands::Recent { journal } => {
            let journal = journal.as_deref().unwrap_or(&config.aps.default_journal);
            let source = ApsSource::with_client(journal, build_client(&cli, &config)?)?;

            let articles = source.recent(&SourceOptions::new()).await?;
            if articles.is_empty() && !cli.quiet {
                eprintln!("No articles in the latest issue of {}", source.name());
            }
            println!("{}", render_articles(&articles, format, is_terminal)?);
        }
        Commands::Search { journal, options } => {
            let source = ApsSource::with_client(journal, build_client(&cli, &config)?)?;
            let options: SourceOptions = options.iter().cloned().collect();

            let articles = source.search(&options).await?;
            println!("{}", render_articles(&articles, format, is_terminal)?);
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
