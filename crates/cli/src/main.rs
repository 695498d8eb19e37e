mod source;
mod views;

use std::io::Read;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use anisauce_core::{
    create_result_store, load_config, load_default_config, validate_config, AniListClient, Config,
    ErrorMode, ResultStore, SanitizedConfig, SearchOrchestrator, SearchOutcome, SearchState,
    TraceMoeClient, TransferData,
};

use source::{read_input, InputSource};

/// Default config file, used when present and `ANISAUCE_CONFIG` is unset.
const DEFAULT_CONFIG_FILE: &str = "anisauce.toml";

#[derive(Parser, Debug)]
#[command(
    name = "anisauce",
    version,
    about = "Find the anime, episode and timestamp behind a screenshot"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for a screenshot file or image URL.
    Search {
        /// Path to an image file, or an http(s) image URL.
        input: String,
    },

    /// Search for whatever is piped on stdin (a copied image URL).
    Paste {
        /// Ignore text that is not an image URL instead of reporting it.
        #[arg(long)]
        silent: bool,
    },

    /// Show the last successful result of this session.
    Show {
        /// Emit JSON (machine-readable).
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,anisauce_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load()?;
    let store = create_result_store(&config.store);

    match cli.cmd {
        Command::Search { input } => {
            let orchestrator = search_view(&config, Arc::clone(&store))?;
            let outcome = match read_input(&input)? {
                InputSource::File(file) => orchestrator.submit_file(file).await,
                InputSource::Url(url) => orchestrator.submit_url(&url).await,
            };
            finish(outcome, store.as_ref())
        }
        Command::Paste { silent } => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;

            let mode = if silent {
                ErrorMode::Silent
            } else {
                ErrorMode::Report
            };
            let orchestrator = search_view(&config, Arc::clone(&store))?;
            let handled = orchestrator
                .handle_paste(TransferData::text(text.trim_end_matches(['\r', '\n'])), mode)
                .await;
            finish(handled.outcome, store.as_ref())
        }
        Command::Show { json } => {
            let entry = store.load_entry();
            if json {
                println!("{}", serde_json::to_string_pretty(&entry)?);
            } else {
                println!("{}", views::render_entry(entry.as_ref()));
            }
            Ok(())
        }
    }
}

/// Resolve, load and validate configuration.
fn load() -> Result<Config> {
    let config = match std::env::var("ANISAUCE_CONFIG") {
        Ok(path) => {
            let path = PathBuf::from(path);
            load_config(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
        Err(_) => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if path.exists() {
                load_config(&path)
                    .with_context(|| format!("Failed to load config from {:?}", path))?
            } else {
                load_default_config().context("Failed to load configuration")?
            }
        }
    };

    validate_config(&config).context("Configuration validation failed")?;
    info!(config = ?SanitizedConfig::from(&config), "Configuration loaded");
    Ok(config)
}

/// Wire the search view: real clients, the session store, and a status
/// line on stderr for every status change.
fn search_view(config: &Config, store: Arc<dyn ResultStore>) -> Result<SearchOrchestrator> {
    let searcher =
        TraceMoeClient::new(config.trace.clone()).context("Failed to create trace.moe client")?;
    let lookup =
        AniListClient::new(config.anilist.clone()).context("Failed to create AniList client")?;

    let last_status = Mutex::new(String::new());
    let on_state = move |state: &SearchState| {
        let mut last = last_status.lock().unwrap_or_else(|p| p.into_inner());
        if !state.status.is_empty() && *last != state.status {
            eprintln!("{}", state.status);
            *last = state.status.clone();
        }
    };

    Ok(SearchOrchestrator::new(
        config.search.clone(),
        Arc::new(searcher),
        Arc::new(lookup),
        store,
    )
    .with_state_callback(Arc::new(on_state)))
}

/// Move to the results view on success; otherwise report the failure.
fn finish(outcome: SearchOutcome, store: &dyn ResultStore) -> Result<()> {
    match outcome {
        SearchOutcome::Completed(result) => {
            // The results view reads from the store; fall back to the
            // in-memory result when persistence is disabled.
            let shown = store.load().unwrap_or(result);
            println!("{}", views::render_result(&shown));
            Ok(())
        }
        SearchOutcome::Failed(message) => bail!(message),
        SearchOutcome::Rejected(error) => bail!(error),
        SearchOutcome::Ignored => {
            info!("Nothing to search");
            Ok(())
        }
    }
}
