//! CLI binary for toc-builder.
//!
//! A thin shim over the library crate: loads the corpus configuration,
//! prompts for any paths not given as arguments, and runs the three passes.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use toc_builder::config::Config;
use toc_builder::{corpus, pdf, toc};

#[derive(Parser)]
#[command(
    name = "toc-builder",
    about = "Build a title,page CSV table of contents for a PDF from a markdown corpus"
)]
struct Cli {
    /// PDF to index (prompted for when omitted)
    pdf: Option<PathBuf>,

    /// Path to save the TOC CSV (prompted for when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML config file naming the markdown corpus roots
    #[arg(short, long, default_value = "toc-builder.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {:?}", cli.config))?;
    config.apply_env_overrides();
    config.validate()?;

    let pdf_path = match cli.pdf {
        Some(path) => path,
        None => PathBuf::from(prompt("PDF to index")?),
    };
    let out_path = match cli.output {
        Some(path) => path,
        None => PathBuf::from(prompt("Path to save TOC (CSV)")?),
    };

    let titles = corpus::collect_titles(&config.corpus.roots)?;

    let pages = pdf::PageExtractor::new(&pdf_path)
        .with_snippet_len(config.pdf.snippet_len)
        .with_split_threshold(config.pdf.split_threshold)
        .extract()?;

    let entries = toc::build_toc(&titles, &pages);
    toc::write_csv(&entries, &out_path)?;

    println!("Done: {}", out_path.display());
    Ok(())
}

/// Read a single line from stdin after printing a label
fn prompt(label: &str) -> Result<String> {
    print!("{label} > ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}
