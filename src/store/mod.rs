// src/store/mod.rs
//
// Ledger = append-only row store. Rows are read in full for every dedup
// check; nothing is indexed, nothing is ever edited in place.

use std::{fs, path::{Path, PathBuf}};

use tracing::debug;

use crate::config::consts::LEDGER_SEP;
use crate::csv::parse_rows;
use crate::error::LedgerError;
use crate::file;

mod appender;

pub use appender::{AppendOutcome, AppendSummary, Clock, FixedClock, LedgerAppender, SystemClock};

pub trait Ledger {
    fn read_all_rows(&mut self) -> Result<Vec<Vec<String>>, LedgerError>;
    fn append_row(&mut self, values: &[String]) -> Result<(), LedgerError>;
    /// Replace the whole content. Not used by the dedup path.
    fn overwrite(&mut self, rows: &[Vec<String>]) -> Result<(), LedgerError>;
}

/// CSV file on disk. A missing file reads as an empty ledger.
pub struct CsvLedger {
    path: PathBuf,
    sep: char,
}

impl CsvLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), sep: LEDGER_SEP }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Ledger for CsvLedger {
    fn read_all_rows(&mut self) -> Result<Vec<Vec<String>>, LedgerError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path)
            .map_err(|source| LedgerError::Io { path: self.path.clone(), source })?;
        let rows = parse_rows(&text, self.sep);
        debug!(path = %self.path.display(), rows = rows.len(), "read ledger");
        Ok(rows)
    }

    fn append_row(&mut self, values: &[String]) -> Result<(), LedgerError> {
        file::append_rows(&self.path, &[values.to_vec()], self.sep)
    }

    fn overwrite(&mut self, rows: &[Vec<String>]) -> Result<(), LedgerError> {
        file::write_rows(&self.path, rows, self.sep)
    }
}

/// In-process ledger; counts writes so callers can assert on side effects.
#[derive(Debug, Default, Clone)]
pub struct MemoryLedger {
    rows: Vec<Vec<String>>,
    pub reads: usize,
    pub writes: usize,
}

impl MemoryLedger {
    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows, ..Self::default() }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

impl Ledger for MemoryLedger {
    fn read_all_rows(&mut self) -> Result<Vec<Vec<String>>, LedgerError> {
        self.reads += 1;
        Ok(self.rows.clone())
    }

    fn append_row(&mut self, values: &[String]) -> Result<(), LedgerError> {
        self.writes += 1;
        self.rows.push(values.to_vec());
        Ok(())
    }

    fn overwrite(&mut self, rows: &[Vec<String>]) -> Result<(), LedgerError> {
        self.writes += 1;
        self.rows = rows.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_path(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("loto_store_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&p);
        p.join("ledger.csv")
    }

    #[test]
    fn csv_ledger_missing_file_is_empty() {
        let mut l = CsvLedger::new(tmp_path("missing"));
        assert!(l.read_all_rows().unwrap().is_empty());
    }

    #[test]
    fn csv_ledger_append_then_read() {
        let mut l = CsvLedger::new(tmp_path("append"));
        l.append_row(&row!["FechaHora", "Num1", "Num2", "Num3"]).unwrap();
        l.append_row(&row!["2024-01-15 21:00:00", "9", "0", "5"]).unwrap();
        let rows = l.read_all_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], row!["2024-01-15 21:00:00", "9", "0", "5"]);

        l.overwrite(&[row!["x"]]).unwrap();
        assert_eq!(l.read_all_rows().unwrap(), vec![row!["x"]]);
    }

    #[test]
    fn memory_ledger_counts() {
        let mut l = MemoryLedger::with_rows(vec![row!["a"]]);
        l.read_all_rows().unwrap();
        l.append_row(&row!["b"]).unwrap();
        assert_eq!((l.reads, l.writes), (1, 1));
        assert_eq!(l.rows().len(), 2);
    }
}
