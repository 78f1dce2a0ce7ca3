//! UMR Tooltips CLI: annotation document on stdin, tooltip cache on stdout.
//!
//! Usage:
//!   umr-tooltips [--plain] [--parallel] [--pretty] [--config FILE] < doc.umr
//!   umr-tooltips render <WORD> [--config FILE] < doc.umr

use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use umr_tooltips::{render_identifier, DocumentIndexer, IndexerConfig, MarkerConfig, TooltipCache};

#[derive(Parser)]
#[command(
    name = "umr-tooltips",
    version,
    about = "Build node tooltips from a UMR annotation document"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Store only the graph text for sentence graphs
    #[arg(long, global = true)]
    plain: bool,

    /// Decode graphs on all cores
    #[arg(long, global = true)]
    parallel: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// YAML file overriding the annotation markers
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rendered tooltip for one identifier
    Render {
        /// Node identifier to look up
        word: String,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn indexer_config(cli: &Cli) -> Result<IndexerConfig, String> {
    let markers = match &cli.config {
        Some(path) => MarkerConfig::load(path).map_err(|e| e.to_string())?,
        None => MarkerConfig::default(),
    };
    let config = if cli.plain {
        IndexerConfig::plain()
    } else {
        IndexerConfig::new()
    };
    Ok(config.with_parallel(cli.parallel).with_markers(markers))
}

fn build_cache(cli: &Cli) -> Result<TooltipCache, String> {
    let config = indexer_config(cli)?;
    let indexer = DocumentIndexer::new(config).map_err(|e| format!("invalid markers: {}", e))?;

    info!("building tooltips for umr document...");

    let mut document = String::new();
    io::stdin()
        .read_to_string(&mut document)
        .map_err(|e| format!("failed to read stdin: {}", e))?;

    let cache = indexer.build(&document).map_err(|e| e.to_string())?;
    info!(entries = cache.len(), "tooltips built successfully");
    Ok(cache)
}

fn cmd_write(cache: &TooltipCache, pretty: bool) -> i32 {
    let json = if pretty {
        serde_json::to_string_pretty(cache)
    } else {
        serde_json::to_string(cache)
    };
    let json = match json {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: failed to serialize cache: {}", e);
            return 1;
        }
    };

    let mut stdout = io::stdout().lock();
    match writeln!(stdout, "{}", json).and_then(|_| stdout.flush()) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: failed to write output: {}", e);
            1
        }
    }
}

fn cmd_render(cache: &TooltipCache, word: &str) -> i32 {
    match render_identifier(cache, word) {
        Some(tooltip) => {
            println!("{}", tooltip);
            0
        }
        None => {
            eprintln!("Error: no tooltip for '{}'", word);
            1
        }
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let cache = match build_cache(&cli) {
        Ok(cache) => cache,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match &cli.command {
        Some(Commands::Render { word }) => cmd_render(&cache, word),
        None => cmd_write(&cache, cli.pretty),
    };
    std::process::exit(code);
}
