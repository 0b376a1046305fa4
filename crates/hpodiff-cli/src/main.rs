//! hpodiff CLI
//!
//! Compares two releases of an ontology (OBO or OBO-style OWL) and writes a
//! spreadsheet listing new terms, obsoletions, label, synonym, definition and
//! superclass changes.

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use hpodiff_ontology::load_ontology;
use hpodiff_reconcile::{ReconcileOptions, Reconciler, ReleasePair, UnresolvedPolicy};
use hpodiff_report::{ReportWriter, XlsxReportWriter, DEFAULT_COLUMN_WIDTH};
use std::fs;
use std::path::{Path, PathBuf};

mod logging;

#[derive(Parser, Debug)]
#[command(name = "hpodiff")]
#[command(
    author,
    version,
    about = "Diff two ontology releases into an xlsx change report"
)]
struct Cli {
    /// First ontology file (.obo, .owl, .rdf, .ttl, .nt)
    first: PathBuf,

    /// Second ontology file; release order is taken from the data versions
    second: PathBuf,

    /// Report path (default: `<dir of FIRST>/hpodiff_<older>_to_<younger>.xlsx`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Column width applied to every report column
    #[arg(long, default_value_t = DEFAULT_COLUMN_WIDTH)]
    column_width: u16,

    /// List every unresolved term before aborting instead of stopping at the first
    #[arg(long)]
    collect_unresolved: bool,

    /// Run the classifier passes one after another
    #[arg(long)]
    sequential: bool,

    #[command(flatten)]
    log: logging::LogArgs,
}

fn ensure_file(path: &Path, which: &str) -> Result<()> {
    if !path.is_file() {
        bail!("{which} does not exist: {}", path.display());
    }
    Ok(())
}

/// Default report location: next to the first input.
fn default_output(first: &Path, pair: &ReleasePair<'_>) -> Result<PathBuf> {
    let first = fs::canonicalize(first)
        .with_context(|| format!("failed to resolve {}", first.display()))?;
    let dir = first.parent().unwrap_or(Path::new("."));
    Ok(dir.join(pair.report_file_name()))
}

fn run(cli: Cli) -> Result<()> {
    ensure_file(&cli.first, "file 1")?;
    ensure_file(&cli.second, "file 2")?;

    println!("{} {}", "Loading".green().bold(), cli.first.display());
    let first = load_ontology(&cli.first)
        .with_context(|| format!("failed to load {}", cli.first.display()))?;
    println!("{} {}", "Loading".green().bold(), cli.second.display());
    let second = load_ontology(&cli.second)
        .with_context(|| format!("failed to load {}", cli.second.display()))?;

    let pair = ReleasePair::order(&first, &second)?;
    println!(
        "older ontology from {}",
        hpodiff_reconcile::version_tag(pair.older.data_version()).cyan()
    );
    println!(
        "younger ontology from {}",
        hpodiff_reconcile::version_tag(pair.younger.data_version()).cyan()
    );

    let out = match cli.output {
        Some(path) => path,
        None => default_output(&cli.first, &pair)?,
    };

    let reconciler = Reconciler::new(ReconcileOptions {
        unresolved: if cli.collect_unresolved {
            UnresolvedPolicy::CollectAll
        } else {
            UnresolvedPolicy::FailFast
        },
        parallel: !cli.sequential,
    });
    let report = reconciler.reconcile(pair.older, pair.younger)?;

    println!("write diff to {}", out.display().to_string().bold());
    XlsxReportWriter::new()
        .with_column_width(cli.column_width)
        .write(&report.to_sheets(), &out)
        .with_context(|| format!("failed to write report {}", out.display()))?;

    for (category, rows) in &report.categories {
        println!("  {:<28} {}", category.sheet_name(), rows.len());
    }
    println!("{} {} changes", "Done".green().bold(), report.total_rows());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log)?;
    run(cli)
}
