// src/store/appender.rs
use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::config::consts::TIMESTAMP_FORMAT;
use crate::config::options::{DedupPolicy, KeyLayout, LedgerOptions};
use crate::data::DrawRecord;
use crate::error::LedgerError;

use super::Ledger;

/// Source of "now" for run timestamps.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Frozen clock for tests and replays.
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended { row: Vec<String> },
    Skipped { reason: String },
}

impl AppendOutcome {
    pub fn is_appended(&self) -> bool {
        matches!(self, AppendOutcome::Appended { .. })
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AppendSummary {
    pub appended: usize,
    pub skipped: usize,
}

/// Read-then-append with one of the dedup policies.
///
/// Every call reads the whole ledger. There is no lock: two processes racing
/// on the same ledger can both see "not present" and both append.
pub struct LedgerAppender<'a> {
    opts: LedgerOptions,
    clock: &'a dyn Clock,
}

impl<'a> LedgerAppender<'a> {
    pub fn new(opts: LedgerOptions, clock: &'a dyn Clock) -> Result<Self, LedgerError> {
        opts.validate().map_err(LedgerError::Config)?;
        Ok(Self { opts, clock })
    }

    pub fn append_if_new(
        &self,
        ledger: &mut dyn Ledger,
        record: &DrawRecord,
    ) -> Result<AppendOutcome, LedgerError> {
        let mut rows = ledger.read_all_rows()?;

        if rows.is_empty() && self.opts.header {
            let header = self.opts.layout.header();
            debug!(?header, "empty ledger, writing header");
            ledger.append_row(&header)?;
            rows = ledger.read_all_rows()?;
        }

        let stamp = self.clock.now().format(TIMESTAMP_FORMAT).to_string();
        let key = self.key_cells(record, &stamp)?;
        let digits = record.digit_cells();
        let width = self.opts.layout.width();

        let duplicate = match self.opts.policy {
            DedupPolicy::ByValue => rows
                .last()
                .and_then(|last| last.get(width..width + 3))
                .is_some_and(|cells| cells == digits.as_slice()),
            DedupPolicy::ByDate => rows
                .iter()
                .any(|r| r.get(..width).is_some_and(|cells| cells == key.as_slice())),
            DedupPolicy::ByRunTimestamp => rows.iter().any(|r| r.first() == Some(&stamp)),
        };

        if duplicate {
            let reason = match self.opts.policy {
                DedupPolicy::ByValue => format!("last row already holds {}", digits.join(" ")),
                DedupPolicy::ByDate => format!("draw {} already recorded", key.join(" ")),
                DedupPolicy::ByRunTimestamp => format!("a row for run {} already exists", stamp),
            };
            info!(policy = ?self.opts.policy, %reason, "skipping duplicate");
            return Ok(AppendOutcome::Skipped { reason });
        }

        let mut row = key;
        row.extend(digits);
        ledger.append_row(&row)?;
        info!(?row, "appended");
        Ok(AppendOutcome::Appended { row })
    }

    /// `append_if_new` for each record, in the order given.
    pub fn append_all(
        &self,
        ledger: &mut dyn Ledger,
        records: &[DrawRecord],
    ) -> Result<AppendSummary, LedgerError> {
        let mut sum = AppendSummary::default();
        for r in records {
            if self.append_if_new(ledger, r)?.is_appended() {
                sum.appended += 1;
            } else {
                sum.skipped += 1;
            }
        }
        Ok(sum)
    }

    fn key_cells(&self, record: &DrawRecord, stamp: &str) -> Result<Vec<String>, LedgerError> {
        Ok(match self.opts.layout {
            KeyLayout::Date => vec![record.date_key().ok_or(LedgerError::MissingKey("draw date"))?],
            KeyLayout::DateSession => vec![
                record.date_key().ok_or(LedgerError::MissingKey("draw date"))?,
                record.session.clone().unwrap_or_default(),
            ],
            KeyLayout::Timestamp => vec![s!(stamp)],
        })
    }
}
