// src/config/options.rs
use std::path::PathBuf;

use chrono::Datelike;

use super::consts::*;

/// Which results page to read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceSelector {
    CurrentYear,
    Year(i32),
    /// Year-less endpoint listing only the newest draw groups.
    Latest,
}

impl SourceSelector {
    /// Year-scoped selectors resolve to `<base>/<year>`, `Latest` to `<base>`.
    pub fn url(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        match self {
            SourceSelector::CurrentYear => format!("{}/{}", base, chrono::Local::now().year()),
            SourceSelector::Year(y) => format!("{}/{}", base, y),
            SourceSelector::Latest => s!(base),
        }
    }

    pub fn is_latest(&self) -> bool {
        matches!(self, SourceSelector::Latest)
    }
}

/// Which rows and number groups of the results table become records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowScope {
    /// Every row, every group (bulk history).
    AllRows,
    /// First row only, first group only.
    FirstRow,
    /// First row carrying at least `n + 1` groups; group `n` only.
    /// A row listing fewer sessions is passed over, never substituted.
    SessionGroup(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateMode {
    /// Row date must normalize; the row is skipped otherwise.
    Required,
    /// Date cell is not read; records carry no date.
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    pub source: SourceSelector,
    pub scope: RowScope,
    pub dates: DateMode,
    pub base_url: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            source: SourceSelector::CurrentYear,
            scope: RowScope::AllRows,
            dates: DateMode::Required,
            base_url: s!(BASE_URL),
        }
    }
}

/// Rule deciding whether a candidate row is already in the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum DedupPolicy {
    /// Candidate digits equal the last row's digit columns.
    ByValue,
    /// Candidate key equals any row's key columns.
    ByDate,
    /// Current run timestamp equals any row's timestamp column.
    /// Only catches re-runs within the same second.
    ByRunTimestamp,
}

/// Key columns written in front of the three digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyLayout {
    /// `Fecha` (YYYY-MM-DD)
    Date,
    /// `Fecha`, `Turno`
    DateSession,
    /// `FechaHora` (run timestamp, second resolution)
    Timestamp,
}

impl KeyLayout {
    pub fn width(self) -> usize {
        match self {
            KeyLayout::Date | KeyLayout::Timestamp => 1,
            KeyLayout::DateSession => 2,
        }
    }

    pub fn header(self) -> Vec<String> {
        let mut h: Vec<String> = match self {
            KeyLayout::Date => vec![s!(DATE_HEADER)],
            KeyLayout::DateSession => vec![s!(DATE_HEADER), s!(SESSION_HEADER)],
            KeyLayout::Timestamp => vec![s!(TIMESTAMP_HEADER)],
        };
        h.extend(DIGIT_HEADERS.iter().map(|d| s!(*d)));
        h
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerOptions {
    pub policy: DedupPolicy,
    pub layout: KeyLayout,
    pub header: bool,
}

impl LedgerOptions {
    /// Reject policy/layout pairs whose key columns cannot answer the dedup question.
    pub fn validate(&self) -> Result<(), String> {
        match (self.policy, self.layout) {
            (DedupPolicy::ByDate, KeyLayout::Timestamp) => {
                Err(s!("by-date dedup needs a date key column, ledger is keyed by run timestamp"))
            }
            (DedupPolicy::ByRunTimestamp, KeyLayout::Date | KeyLayout::DateSession) => {
                Err(s!("by-run-timestamp dedup needs a timestamp key column, ledger is keyed by date"))
            }
            _ => Ok(()),
        }
    }
}

impl Default for LedgerOptions {
    fn default() -> Self {
        Self {
            policy: DedupPolicy::ByDate,
            layout: KeyLayout::DateSession,
            header: true,
        }
    }
}

/// What a page-level failure does to the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum FailureMode {
    /// Propagate; the process exits non-zero.
    Strict,
    /// Log and report; nothing is written and the run counts as finished.
    Defensive,
}

/// Preset combinations matching the observed script variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Variant {
    /// Newest row of the year table, keyed by draw date, deduped by value.
    Latest,
    /// Day draw of the newest row, keyed by run timestamp.
    Day,
    /// Evening draw: second group of the first row that has one.
    Evening,
    /// Whole year table, keyed by date and session.
    Archive,
    /// Year-less endpoint, first group found.
    Newest,
}

impl Variant {
    pub fn options(self) -> RunOptions {
        let (extract, ledger, failure) = match self {
            Variant::Latest => (
                ExtractOptions { scope: RowScope::FirstRow, ..ExtractOptions::default() },
                LedgerOptions { policy: DedupPolicy::ByValue, layout: KeyLayout::Date, header: false },
                FailureMode::Strict,
            ),
            Variant::Day => (
                ExtractOptions { scope: RowScope::FirstRow, ..ExtractOptions::default() },
                LedgerOptions { policy: DedupPolicy::ByRunTimestamp, layout: KeyLayout::Timestamp, header: true },
                FailureMode::Strict,
            ),
            Variant::Evening => (
                ExtractOptions {
                    scope: RowScope::SessionGroup(1),
                    dates: DateMode::Ignored,
                    ..ExtractOptions::default()
                },
                LedgerOptions { policy: DedupPolicy::ByRunTimestamp, layout: KeyLayout::Timestamp, header: true },
                FailureMode::Defensive,
            ),
            Variant::Archive => (
                ExtractOptions::default(),
                LedgerOptions::default(),
                FailureMode::Defensive,
            ),
            Variant::Newest => (
                ExtractOptions {
                    source: SourceSelector::Latest,
                    scope: RowScope::FirstRow,
                    dates: DateMode::Ignored,
                    ..ExtractOptions::default()
                },
                LedgerOptions { policy: DedupPolicy::ByRunTimestamp, layout: KeyLayout::Timestamp, header: true },
                FailureMode::Strict,
            ),
        };
        RunOptions { extract, ledger, failure, ledger_path: PathBuf::from(DEFAULT_LEDGER) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub extract: ExtractOptions,
    pub ledger: LedgerOptions,
    pub failure: FailureMode,
    pub ledger_path: PathBuf,
}

impl RunOptions {
    /// Single-record flows treat "nothing parsed" as fatal.
    pub fn single_record(&self) -> bool {
        !matches!(self.extract.scope, RowScope::AllRows)
    }

    /// Ledger checks plus: a date-keyed ledger needs records that carry a date.
    /// The year-less page and `DateMode::Ignored` never produce one.
    pub fn validate(&self) -> Result<(), String> {
        self.ledger.validate()?;
        let dated = !self.extract.source.is_latest() && self.extract.dates == DateMode::Required;
        match self.ledger.layout {
            KeyLayout::Date | KeyLayout::DateSession if !dated => Err(s!(
                "ledger is keyed by draw date, but this source yields no dates (use a timestamp key)"
            )),
            _ => Ok(()),
        }
    }
}
