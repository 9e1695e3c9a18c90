use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sampledex::filter::{FilterCriteria, KeySelector};
use sampledex::library::Library;
use sampledex::models::Sample;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sampledex", version, about = "Audio sample library browser")]
struct Cli {
    /// Sample directory to index (defaults to config sample_dir, then ~/Splice/sounds)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List samples matching the given filters
    List {
        /// Filename substring (case-insensitive)
        #[arg(short, long, default_value = "")]
        search: String,

        /// Minimum BPM (ignored if not a number)
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        min_bpm: String,

        /// Maximum BPM (ignored if not a number)
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        max_bpm: String,

        /// Key: All, or one of C C# D D# E F F# G G# A A# B (flats accepted)
        #[arg(short, long, default_value = "All")]
        key: KeySelector,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Maximum number of rows to print (0 = all)
        #[arg(short = 'n', long, default_value = "0")]
        limit: usize,
    },

    /// Show the available key filter choices
    Keys,

    /// Show library statistics
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Keys => {
            for choice in KeySelector::choices() {
                println!("{choice}");
            }
        }

        Commands::List { search, min_bpm, max_bpm, key, json, limit } => {
            let library = open_library(cli.dir)?;
            let criteria = FilterCriteria::from_inputs(&search, &min_bpm, &max_bpm, key);
            log::debug!("Filter: {:?}", criteria);

            let mut results = library.filter(&criteria);
            let matched = results.len();
            if limit > 0 {
                results.truncate(limit);
            }

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&results).context("Failed to encode JSON")?
                );
                return Ok(());
            }

            if results.is_empty() {
                println!("No samples match.");
                return Ok(());
            }

            print_sample_table(&results);
            println!();
            println!("{} of {} samples", matched, library.len());
        }

        Commands::Stats => {
            let library = open_library(cli.dir)?;
            let stats = library.stats();
            println!("Library Statistics");
            println!("==================");
            println!("Root:             {}", library.root().display());
            println!("Total samples:    {}", stats.total_samples);
            println!("With BPM:         {}", stats.with_tempo);
            println!("With key:         {}", stats.with_key);
            println!("Scan warnings:    {}", library.warnings().len());
            println!();

            if !stats.formats.is_empty() {
                println!("Formats:");
                for (fmt, count) in &stats.formats {
                    println!("  {:<8} {}", fmt, count);
                }
                println!();
            }

            if !stats.keys.is_empty() {
                println!("Keys:");
                for (key, count) in &stats.keys {
                    println!("  {:<8} {}", key, count);
                }
            }
        }
    }

    Ok(())
}

/// Resolve the sample directory (CLI > config > Splice default) and scan it.
fn open_library(cli_dir: Option<PathBuf>) -> Result<Library> {
    // Load config file (optional, defaults if missing)
    let config = sampledex::config::AppConfig::load();

    let dir = sampledex::config::resolve_sample_dir(cli_dir, &config).context(
        "No sample directory. Pass --dir or set sample_dir in config (~/Splice/sounds is used if present).",
    )?;
    log::info!("Sample directory: {}", dir.display());

    Library::open(&dir).context("Scan failed")
}

/// Print samples as a Filename / BPM / Key table.
fn print_sample_table(samples: &[&Sample]) {
    println!("{:<50} {:>5} {:>5}", "Filename", "BPM", "Key");
    println!("{}", "-".repeat(62));

    for s in samples {
        // Truncate long filenames
        let name: String = if s.filename.chars().count() > 50 {
            format!("{}...", s.filename.chars().take(47).collect::<String>())
        } else {
            s.filename.clone()
        };

        println!("{:<50} {:>5} {:>5}", name, s.tempo_display(), s.key_display());
        log::debug!("  {}", s.path.display());
    }
}
