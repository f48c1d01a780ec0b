// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Page-level and run-level failures.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("page structure not found: {0}")]
    ParseStructure(String),

    #[error("unrecognized month in date '{0}'")]
    UnrecognizedMonth(String),

    #[error("malformed draw record: {0}")]
    MalformedRecord(String),

    /// Single-record flow found nothing usable on an otherwise valid page.
    #[error("no draw could be extracted ({skipped} candidate(s) skipped)")]
    NoDraw { skipped: usize },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger i/o on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("record has no {0} for this ledger's key column")]
    MissingKey(&'static str),

    #[error("invalid ledger configuration: {0}")]
    Config(String),
}

/// Why a single row or number group was passed over.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("row has fewer than 2 cells")]
    FewCells,

    #[error("row has no date anchor")]
    MissingDate,

    #[error("date text '{0}' is too short")]
    ShortDate(String),

    #[error("unrecognized month in '{0}'")]
    UnrecognizedMonth(String),

    #[error("date '{0}' does not parse as day month year")]
    BadDate(String),

    #[error("row lists no number group at the requested position")]
    MissingGroup,

    #[error("{0}")]
    Malformed(String),
}

impl From<SkipReason> for ScrapeError {
    fn from(reason: SkipReason) -> Self {
        match reason {
            SkipReason::UnrecognizedMonth(raw) => ScrapeError::UnrecognizedMonth(raw),
            other => ScrapeError::MalformedRecord(other.to_string()),
        }
    }
}
