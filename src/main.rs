use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use softscrape::config::{find_config_file, get_config, load_config, Config};
use softscrape::export::CsvExporter;
use softscrape::fetch::Fetcher;
use softscrape::pipeline::{HarvestPlan, Harvester};
use softscrape::sources::{Engine, SerpApiPager};
use softscrape::utils::init_logging;
use std::path::PathBuf;

/// softscrape - Harvest bibliographic metadata from search results into CSV
#[derive(Parser, Debug)]
#[command(name = "softscrape")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Harvest bibliographic metadata from search results into CSV", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress progress bars and non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Search engine to query
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum EngineArg {
    /// Google web search
    Google,
    /// Google Scholar (enables publication metadata fallbacks)
    Scholar,
}

impl From<EngineArg> for Engine {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Google => Engine::Google,
            EngineArg::Scholar => Engine::Scholar,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search, visit every result and export the metadata as CSV
    #[command(alias = "run")]
    Harvest {
        /// Search engine
        #[arg(long, short, value_enum, default_value_t = EngineArg::Google)]
        engine: EngineArg,

        /// Boolean search query (default: from config)
        #[arg(long)]
        query: Option<String>,

        /// Number of result pages
        #[arg(long, short)]
        pages: Option<usize>,

        /// Pause after each page, in seconds
        #[arg(long)]
        pause: Option<f64>,

        /// Per-request timeout for result pages, in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Directory for the CSV file
        #[arg(long, short)]
        output_dir: Option<PathBuf>,

        /// File name prefix
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    if let Some(path) = &cli.config {
        return load_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()));
    }
    match find_config_file() {
        Some(path) => load_config(&path)
            .with_context(|| format!("Failed to load config file {}", path.display())),
        None => get_config().context("Invalid SOFTSCRAPE__ environment configuration"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = resolve_config(&cli)?;

    match cli.command {
        Commands::Config => {
            if config.api_keys.serpapi.is_some() {
                config.api_keys.serpapi = Some("********".to_string());
            }
            print!("{}", config.to_toml()?);
        }

        Commands::Harvest {
            engine,
            query,
            pages,
            pause,
            timeout,
            output_dir,
            prefix,
        } => {
            if let Some(query) = query {
                config.search.query = query;
            }
            if let Some(pages) = pages {
                config.search.pages = pages;
            }
            if let Some(pause) = pause {
                config.search.pause_secs = pause;
            }
            if let Some(timeout) = timeout {
                config.fetch.timeout_secs = timeout;
            }
            if let Some(dir) = output_dir {
                config.export.output_dir = dir;
            }
            if let Some(prefix) = prefix {
                config.export.prefix = prefix;
            }

            let log = init_logging(&config.logging, cli.verbose, cli.quiet)?;
            tracing::debug!("Errors are also written to {}", log.error_log_path().display());

            let engine = Engine::from(engine);
            let pager = SerpApiPager::new(&config)?;
            let fetcher = Fetcher::new(&config.fetch)?;
            let plan = HarvestPlan::new(&config.search, engine);

            tracing::info!(
                "Harvesting {} page(s) from {} for: {}",
                plan.pages,
                engine.api_name(),
                plan.query
            );

            let harvester = Harvester::new(pager, fetcher, plan).with_progress(cli.quiet);
            let records = harvester.run().await;

            let exporter = CsvExporter::from_config(&config.export);
            let path = exporter
                .export(&records, engine.tag())
                .context("Failed to write the CSV export")?;

            tracing::info!("Final file: {}", path.display());
            if !cli.quiet {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
