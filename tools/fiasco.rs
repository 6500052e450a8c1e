//! Fiasco: generate a table of connections from a playset file.
//!
//! Usage: fiasco <playset.txt> <name1,name2,...> [--pairing <strategy>] [--seed <n>]

use clap::Parser;
use fiasco_engine::core::config::GeneratorConfig;
use fiasco_engine::core::loader;
use fiasco_engine::core::report::{self, ReportFormat};
use fiasco_engine::{PairingStrategy, SectionChoice, Setup};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fiasco")]
#[command(about = "Generate relationships and details for everyone at the table", long_about = None)]
struct Cli {
    /// Path to the playset text file
    playset: PathBuf,

    /// Comma-separated participant names, in seating order
    names: String,

    /// ring, all-combinations or random-coverage
    #[arg(long)]
    pairing: Option<PairingStrategy>,

    /// round-robin or random
    #[arg(long)]
    sections: Option<SectionChoice>,

    /// Seed for a reproducible table
    #[arg(long)]
    seed: Option<u64>,

    /// RON generator config; flags given on the command line win
    #[arg(long)]
    config: Option<PathBuf>,

    /// text or ron
    #[arg(long, default_value = "text")]
    format: ReportFormat,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => GeneratorConfig::load_from_ron(path).unwrap_or_else(|e| {
            eprintln!("Error reading config '{}': {}", path.display(), e);
            process::exit(1);
        }),
        None => GeneratorConfig::default(),
    };
    if let Some(pairing) = cli.pairing {
        config.pairing = pairing;
    }
    if let Some(sections) = cli.sections {
        config.section_choice = sections;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let playset = loader::load_from_file(&cli.playset).unwrap_or_else(|e| {
        eprintln!("Error loading playset '{}': {}", cli.playset.display(), e);
        process::exit(1);
    });

    let names = split_names(&cli.names);
    let table = Setup::new(&playset, &names)
        .with_config(&config)
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Error building setup: {}", e);
            process::exit(1);
        });

    match report::render(cli.format, &playset.name, &table) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("Error rendering report: {}", e);
            process::exit(1);
        }
    }
}

/// Split a comma-separated list, trimming names and dropping empty ones.
fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
