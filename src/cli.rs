// src/cli.rs
use std::path::PathBuf;

use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;

use crate::config::consts::{BASE_URL, DEFAULT_HISTORY, DEFAULT_LEDGER, DEFAULT_SEQ_LEN, DEFAULT_WINDOWS, FIRST_YEAR};
use crate::config::options::{DateMode, DedupPolicy, FailureMode, KeyLayout, RowScope, RunOptions, SourceSelector, Variant};
use crate::core::HttpSource;
use crate::progress::Progress;
use crate::store::{CsvLedger, SystemClock};
use crate::{log, runner};

#[derive(Parser, Debug)]
#[command(name = "loto_scrape", version, about = "Loto 3 results scraper with a deduplicating CSV ledger")]
struct Cli {
    /// Log file (filter with LOTO_LOG, e.g. LOTO_LOG=debug)
    #[arg(long, value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape the results page and append new draws to the ledger
    Append(AppendArgs),
    /// Scrape a range of years into one CSV (Fecha,Turno,Num1..3)
    History(HistoryArgs),
    /// Scrape a range of years and write fixed-length training windows
    Windows(WindowsArgs),
}

#[derive(Args, Debug)]
struct AppendArgs {
    /// Preset matching one of the scraping variants
    #[arg(long, value_enum, default_value = "latest")]
    variant: Variant,

    /// Read this year's page instead of the current year's
    #[arg(long, conflicts_with = "latest")]
    year: Option<i32>,

    /// Read the year-less latest-results page
    #[arg(long)]
    latest: bool,

    /// Override the preset's dedup policy
    #[arg(long, value_enum)]
    policy: Option<DedupPolicy>,

    /// Write a header row into an empty ledger
    #[arg(long, conflicts_with = "no_header")]
    header: bool,

    /// Never write a header row
    #[arg(long)]
    no_header: bool,

    /// Override the preset's failure handling
    #[arg(long, value_enum)]
    mode: Option<FailureMode>,

    /// Ledger CSV file
    #[arg(long, env = "LOTO_LEDGER", default_value = DEFAULT_LEDGER)]
    ledger: PathBuf,

    #[command(flatten)]
    site: SiteArgs,
}

#[derive(Args, Debug)]
struct SiteArgs {
    /// Results base URL (year pages live at <base>/<year>)
    #[arg(long, env = "LOTO_BASE_URL", default_value = BASE_URL)]
    base_url: String,
}

#[derive(Args, Debug)]
struct YearRange {
    /// First year to scrape
    #[arg(long, default_value_t = FIRST_YEAR)]
    from: i32,

    /// Last year to scrape (default: current year)
    #[arg(long)]
    to: Option<i32>,
}

impl YearRange {
    fn resolve(&self) -> Result<std::ops::RangeInclusive<i32>> {
        let to = self.to.unwrap_or_else(|| chrono::Local::now().year());
        if self.from > to {
            return Err(eyre!("invalid year range: {} > {}", self.from, to));
        }
        Ok(self.from..=to)
    }
}

#[derive(Args, Debug)]
struct HistoryArgs {
    #[command(flatten)]
    years: YearRange,

    #[arg(short, long, default_value = DEFAULT_HISTORY)]
    out: PathBuf,

    #[command(flatten)]
    site: SiteArgs,
}

#[derive(Args, Debug)]
struct WindowsArgs {
    #[command(flatten)]
    years: YearRange,

    /// Inputs per window
    #[arg(long, default_value_t = DEFAULT_SEQ_LEN)]
    seq_len: usize,

    #[arg(short, long, default_value = DEFAULT_WINDOWS)]
    out: PathBuf,

    #[command(flatten)]
    site: SiteArgs,
}

/// Prints progress lines to stdout.
struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn item_failed(&mut self, label: &str, err: &str) {
        eprintln!("{label}: {err}");
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    log::init(&cli.log_file.clone().unwrap_or_else(log::default_path));

    match cli.command {
        Command::Append(args) => append(args),
        Command::History(args) => history(args),
        Command::Windows(args) => windows(args),
    }
}

fn append(args: AppendArgs) -> Result<()> {
    let opts = append_options(&args);
    opts.validate().map_err(|e| eyre!(e))?;
    let source = HttpSource::new()?;
    let mut ledger = CsvLedger::new(&opts.ledger_path);
    let mut progress = ConsoleProgress;

    let report = runner::run_append(&opts, &source, &mut ledger, &SystemClock, Some(&mut progress as &mut dyn Progress))?;
    if report.error.is_none() {
        println!(
            "{} appended, {} already present, {} row(s) skipped while parsing → {}",
            report.appended(),
            report.outcomes.len() - report.appended(),
            report.skipped_rows,
            ledger.path().display()
        );
    }
    Ok(())
}

/// Preset, then per-flag overrides.
fn append_options(args: &AppendArgs) -> RunOptions {
    let mut opts = args.variant.options();
    opts.ledger_path = args.ledger.clone();
    opts.extract.base_url = args.site.base_url.clone();

    if let Some(y) = args.year {
        opts.extract.source = SourceSelector::Year(y);
    }
    if args.latest {
        use_latest_page(&mut opts, args.policy);
    }
    if let Some(policy) = args.policy {
        apply_policy(&mut opts, policy);
    }
    if args.header {
        opts.ledger.header = true;
    }
    if args.no_header {
        opts.ledger.header = false;
    }
    if let Some(mode) = args.mode {
        opts.failure = mode;
    }
    opts
}

/// The year-less page has no dates: key by run timestamp, keeping by-value
/// only when asked for.
fn use_latest_page(opts: &mut RunOptions, policy: Option<DedupPolicy>) {
    opts.extract.source = SourceSelector::Latest;
    opts.extract.scope = RowScope::FirstRow;
    opts.extract.dates = DateMode::Ignored;
    opts.ledger.layout = KeyLayout::Timestamp;
    if policy != Some(DedupPolicy::ByValue) {
        opts.ledger.policy = DedupPolicy::ByRunTimestamp;
    }
}

/// Keep the key columns able to answer the chosen policy.
fn apply_policy(opts: &mut RunOptions, policy: DedupPolicy) {
    opts.ledger.policy = policy;
    opts.ledger.layout = match (policy, opts.ledger.layout) {
        (DedupPolicy::ByRunTimestamp, _) => KeyLayout::Timestamp,
        (DedupPolicy::ByDate, KeyLayout::Timestamp) if opts.extract.scope == RowScope::AllRows => {
            KeyLayout::DateSession
        }
        (DedupPolicy::ByDate, KeyLayout::Timestamp) => KeyLayout::Date,
        (_, layout) => layout,
    };
}

fn history(args: HistoryArgs) -> Result<()> {
    let years = args.years.resolve()?;
    let source = HttpSource::new()?;
    let mut out = CsvLedger::new(&args.out);
    let mut progress = ConsoleProgress;

    let report = runner::run_history(&source, &args.site.base_url, years, &mut out, Some(&mut progress as &mut dyn Progress))
        .wrap_err("writing history")?;
    println!(
        "{} draws written to {} ({} year(s) failed, {} row(s) skipped)",
        report.rows_written,
        out.path().display(),
        report.failed_years.len(),
        report.skipped_rows
    );
    Ok(())
}

fn windows(args: WindowsArgs) -> Result<()> {
    if args.seq_len == 0 {
        return Err(eyre!("--seq-len must be at least 1"));
    }
    let years = args.years.resolve()?;
    let source = HttpSource::new()?;
    let mut out = CsvLedger::new(&args.out);
    let mut progress = ConsoleProgress;

    let report = runner::run_windows(
        &source,
        &args.site.base_url,
        years,
        args.seq_len,
        &mut out,
        Some(&mut progress as &mut dyn Progress),
    )
    .wrap_err("writing training windows")?;
    println!("{} windows written to {}", report.rows_written, out.path().display());
    Ok(())
}
