// src/runner.rs
//
// Pipelines wired from injected collaborators: a page source, a ledger and a
// clock. Nothing here is global; the CLI builds each piece once per run.

use std::ops::RangeInclusive;

use tracing::{error, info};

use crate::{
    config::options::{FailureMode, RowScope, RunOptions},
    core::PageSource,
    error::{LedgerError, ScrapeError},
    history,
    progress::Progress,
    scrape::{Extraction, ResultExtractor},
    store::{AppendOutcome, Clock, Ledger, LedgerAppender},
};

/// What an append run did.
#[derive(Debug, Default)]
pub struct RunReport {
    pub url: String,
    pub outcomes: Vec<AppendOutcome>,
    pub skipped_rows: usize,
    /// Set when a defensive run swallowed a failure; nothing was written past it.
    pub error: Option<String>,
}

impl RunReport {
    pub fn appended(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_appended()).count()
    }
}

/// Fetch → parse → dedup-append.
///
/// Strict runs return every failure. Defensive runs log it, report it through
/// `progress` and return `Ok` with `error` set.
pub fn run_append(
    opts: &RunOptions,
    source: &dyn PageSource,
    ledger: &mut dyn Ledger,
    clock: &dyn Clock,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunReport, ScrapeError> {
    let mut report = RunReport::default();

    // Shorter trait-object lifetime, so `progress` is usable again below.
    let inner = progress.as_deref_mut().map(|p| p as &mut dyn Progress);
    match append_inner(opts, source, ledger, clock, &mut report, inner) {
        Ok(()) => Ok(report),
        Err(e) => match opts.failure {
            FailureMode::Strict => Err(e),
            FailureMode::Defensive => {
                error!(error = %e, "run failed, nothing more written");
                if let Some(p) = progress.as_deref_mut() {
                    p.log(&format!("Error fetching or recording the draw: {e}"));
                }
                report.error = Some(e.to_string());
                Ok(report)
            }
        },
    }
}

fn append_inner(
    opts: &RunOptions,
    source: &dyn PageSource,
    ledger: &mut dyn Ledger,
    clock: &dyn Clock,
    report: &mut RunReport,
    mut progress: Option<&mut dyn Progress>,
) -> Result<(), ScrapeError> {
    opts.validate().map_err(LedgerError::Config)?;
    let appender = LedgerAppender::new(opts.ledger.clone(), clock)?;
    let extractor = ResultExtractor::new(source, opts.extract.clone());

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Fetching Loto 3 results from {}…", opts.extract.source.url(&opts.extract.base_url)));
    }

    let ex = extractor.fetch_configured()?;
    report.url = ex.url.clone();
    report.skipped_rows = ex.skipped();

    let records = if opts.single_record() {
        vec![single(ex, opts.extract.scope)?]
    } else {
        // Page lists newest first; the ledger grows oldest first. A stable sort
        // keeps same-date sessions in page order (Día before Tarde).
        let mut all = ex.records;
        if all.iter().all(|r| r.draw_date.is_some()) {
            all.sort_by_key(|r| r.draw_date);
        } else {
            all.reverse();
        }
        all
    };

    if let Some(p) = progress.as_deref_mut() {
        p.begin(records.len());
    }

    for r in &records {
        let outcome = appender.append_if_new(ledger, r)?;
        if let Some(p) = progress.as_deref_mut() {
            match &outcome {
                AppendOutcome::Appended { row } => p.log(&format!("Draw added: {} ({})", r, row.join(","))),
                AppendOutcome::Skipped { reason } => p.log(&format!("Draw already recorded: {reason}")),
            }
            p.item_done(&r.to_string());
        }
        report.outcomes.push(outcome);
    }

    info!(appended = report.appended(), total = records.len(), "append run finished");
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(())
}

/// Single-record flows need exactly one record; with none, the row's own
/// failure (e.g. an unrecognized month) becomes the run's error.
fn single(ex: Extraction, scope: RowScope) -> Result<crate::data::DrawRecord, ScrapeError> {
    let skipped = ex.skipped();
    if let Some(first) = ex.records.into_iter().next() {
        return Ok(first);
    }
    match (scope, ex.skips.into_iter().last()) {
        (RowScope::FirstRow, Some(skip)) => Err(skip.reason.into()),
        _ => Err(ScrapeError::NoDraw { skipped }),
    }
}

#[derive(Debug)]
pub struct HistoryReport {
    pub rows_written: usize,
    pub failed_years: Vec<i32>,
    pub skipped_rows: usize,
}

/// Scrape a range of years and replace `out` with the full draw list.
pub fn run_history(
    source: &dyn PageSource,
    base_url: &str,
    years: RangeInclusive<i32>,
    out: &mut dyn Ledger,
    progress: Option<&mut dyn Progress>,
) -> Result<HistoryReport, ScrapeError> {
    let h = history::collect(source, base_url, years, progress);
    let rows = history::history_rows(&h.records);
    out.overwrite(&rows)?;
    Ok(HistoryReport {
        rows_written: h.records.len(),
        failed_years: h.failed_years,
        skipped_rows: h.skipped,
    })
}

/// Scrape a range of years and write `seq_len` training windows to `out`.
pub fn run_windows(
    source: &dyn PageSource,
    base_url: &str,
    years: RangeInclusive<i32>,
    seq_len: usize,
    out: &mut dyn Ledger,
    progress: Option<&mut dyn Progress>,
) -> Result<HistoryReport, ScrapeError> {
    let h = history::collect(source, base_url, years, progress);
    let windows = history::windows(&h.records, seq_len);
    info!(draws = h.records.len(), windows = windows.len(), seq_len, "built training windows");
    out.overwrite(&history::window_rows(&windows, seq_len))?;
    Ok(HistoryReport {
        rows_written: windows.len(),
        failed_years: h.failed_years,
        skipped_rows: h.skipped,
    })
}
