use cellar_search::api::client::{CatalogError, CatalogSource, fetch_catalog};
use cellar_search::app::state::App;
use cellar_search::config::{AppConfig, ConfigError, LoggingConfig};
use cellar_search::util::format_price;
use cellar_search::{MatchResult, SearchOutcome, Suggestion, events, format_outcome, search};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Search a wine catalog with free-text questions.
#[derive(Debug, Parser)]
#[command(name = "cellar-search", version, about)]
struct Cli {
    /// Catalog JSON: a local path or an http(s) URL.
    #[arg(short, long, default_value = "catalog.json")]
    catalog: String,

    /// TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Answer a single question and exit instead of starting the TUI.
    #[arg(short, long)]
    query: Option<String>,

    /// With --query, also print scores and the signals behind them.
    #[arg(long, requires = "query")]
    explain: bool,

    /// With --query, print the raw outcome as JSON.
    #[arg(long, requires = "query", conflicts_with = "explain")]
    json: bool,

    /// Write logs to this file (overrides the config).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut cfg = AppConfig::load_or_default(cli.config.as_deref())?;
    if cli.log_file.is_some() {
        cfg.logging.file = cli.log_file.clone();
    }
    init_logging(&cfg.logging, cli.query.is_none())?;

    let source = CatalogSource::parse(&cli.catalog);
    let items = fetch_catalog(&source).await?;

    if let Some(query) = &cli.query {
        let outcome = search(query, &items, &cfg.engine);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            println!("{}", format_outcome(&outcome));
            if cli.explain {
                print_explanation(&outcome);
            }
        }
        return Ok(());
    }

    let mut app = App::new(source, items, cfg.engine.clone());
    events::run::run_app(&mut app, &cfg.ui).await?;
    Ok(())
}

fn init_logging(cfg: &LoggingConfig, interactive: bool) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));
    match &cfg.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // stderr would scribble over the alternate screen
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn print_explanation(outcome: &SearchOutcome) {
    println!();
    println!("intent: {:?}   scored: {:?}", outcome.intent, outcome.query_used);
    let rows: &[MatchResult] = match &outcome.suggestion {
        _ if !outcome.matches.is_empty() => &outcome.matches,
        Some(Suggestion::HistoricalUnavailable(m)) => std::slice::from_ref(m),
        Some(Suggestion::Alternatives { items, .. }) => items,
        _ => &[],
    };
    for m in rows {
        println!(
            "{:>7.1}  {}  ({})",
            m.score,
            m.item.title.trim(),
            format_price(m.item.price_minor_units)
        );
        for r in &m.reasons {
            println!("         {:+.1} {}", r.points, r.reason);
        }
    }
}
