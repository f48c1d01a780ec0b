// src/history.rs
//
// Multi-year collection and the fixed-length digit windows fed to the
// (external) sequence model trainers.

use std::ops::RangeInclusive;

use tracing::{info, warn};

use crate::{
    config::consts::{DATE_HEADER, DIGIT_HEADERS, SESSION_HEADER},
    config::options::{DateMode, ExtractOptions, RowScope, SourceSelector},
    core::PageSource,
    data::DrawRecord,
    progress::Progress,
    scrape::ResultExtractor,
};

#[derive(Debug, Default)]
pub struct History {
    /// Oldest first.
    pub records: Vec<DrawRecord>,
    pub failed_years: Vec<i32>,
    pub skipped: usize,
}

/// Scrape every year in `years`. A year whose page fails is reported and
/// contributes nothing; it does not stop the others.
pub fn collect(
    source: &dyn PageSource,
    base_url: &str,
    years: RangeInclusive<i32>,
    mut progress: Option<&mut dyn Progress>,
) -> History {
    let opts = ExtractOptions {
        source: SourceSelector::CurrentYear,
        scope: RowScope::AllRows,
        dates: DateMode::Required,
        base_url: s!(base_url),
    };
    let extractor = ResultExtractor::new(source, opts);

    if let Some(p) = progress.as_deref_mut() {
        p.begin(years.clone().count());
    }

    let mut out = History::default();
    for year in years {
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Processing year {year}…"));
        }
        match extractor.fetch(&SourceSelector::Year(year)) {
            Ok(ex) => {
                out.skipped += ex.skipped();
                out.records.extend(ex.records);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&year.to_string());
                }
            }
            Err(e) => {
                warn!(year, error = %e, "year failed");
                out.failed_years.push(year);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&year.to_string(), &e.to_string());
                }
            }
        }
    }

    // Stable: same-date draws keep page order (Día before Tarde).
    out.records.sort_by_key(|r| r.draw_date);
    info!(
        records = out.records.len(),
        skipped = out.skipped,
        failed = out.failed_years.len(),
        "history collected"
    );

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    out
}

/// `Fecha,Turno,Num1,Num2,Num3` rows, header first.
pub fn history_rows(records: &[DrawRecord]) -> Vec<Vec<String>> {
    let mut header = vec![s!(DATE_HEADER), s!(SESSION_HEADER)];
    header.extend(DIGIT_HEADERS.iter().map(|h| s!(*h)));

    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(header);
    for r in records {
        let mut row = vec![r.date_key().unwrap_or_default(), r.session.clone().unwrap_or_default()];
        row.extend(r.digit_cells());
        rows.push(row);
    }
    rows
}

/// One training sample: `seq_len` consecutive values and the one that follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub inputs: Vec<u8>,
    pub target: u8,
}

/// Sliding windows over each draw's last digit, in record order.
/// Fewer than `seq_len + 1` draws (or `seq_len == 0`) yields nothing.
pub fn windows(records: &[DrawRecord], seq_len: usize) -> Vec<Window> {
    if seq_len == 0 {
        return Vec::new();
    }
    let values: Vec<u8> = records.iter().map(DrawRecord::last_digit).collect();
    values
        .windows(seq_len + 1)
        .map(|w| Window { inputs: w[..seq_len].to_vec(), target: w[seq_len] })
        .collect()
}

/// `x1..xN,y` rows, header first.
pub fn window_rows(windows: &[Window], seq_len: usize) -> Vec<Vec<String>> {
    let mut header: Vec<String> = (1..=seq_len).map(|i| format!("x{i}")).collect();
    header.push(s!("y"));

    let mut rows = Vec::with_capacity(windows.len() + 1);
    rows.push(header);
    for w in windows {
        let mut row: Vec<String> = w.inputs.iter().map(|v| v.to_string()).collect();
        row.push(w.target.to_string());
        rows.push(row);
    }
    rows
}
