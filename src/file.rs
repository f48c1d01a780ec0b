// src/file.rs

use std::{
    fs::{self, File, OpenOptions},
    io::{BufWriter, Read, Seek, SeekFrom, Write},
    path::Path,
};

use crate::csv::{needs_line_break, write_row};
use crate::error::LedgerError;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> LedgerError + '_ {
    move |source| LedgerError::Io { path: path.to_path_buf(), source }
}

/// Create/truncate `path` and write every row.
pub fn write_rows(path: &Path, rows: &[Vec<String>], sep: char) -> Result<(), LedgerError> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(io_err(path))?;
    let mut out = BufWriter::new(file);
    for row in rows {
        write_row(&mut out, row, sep).map_err(io_err(path))?;
    }
    out.flush().map_err(io_err(path))?;
    Ok(())
}

/// Append rows, creating the file (and its directory) when missing.
/// A last line without a newline is terminated first.
pub fn append_rows(path: &Path, rows: &[Vec<String>], sep: char) -> Result<(), LedgerError> {
    ensure_parent(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .map_err(io_err(path))?;
    let tail = last_byte(&mut file).map_err(io_err(path))?;

    let mut out = BufWriter::new(file);
    if needs_line_break(&tail) {
        writeln!(out).map_err(io_err(path))?;
    }
    for row in rows {
        write_row(&mut out, row, sep).map_err(io_err(path))?;
    }
    out.flush().map_err(io_err(path))?;
    Ok(())
}

fn last_byte(file: &mut File) -> std::io::Result<Vec<u8>> {
    if file.metadata()?.len() == 0 {
        return Ok(Vec::new());
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = vec![0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last)
}

pub fn ensure_parent(path: &Path) -> Result<(), LedgerError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

pub fn ensure_directory(dir: &Path) -> Result<(), LedgerError> {
    if dir.exists() && !dir.is_dir() {
        return Err(LedgerError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(io_err(dir))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("loto_file_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&p);
        p
    }

    #[test]
    fn append_creates_nested_dirs() {
        let dir = tmp_dir("append");
        let path = dir.join("a/b/ledger.csv");
        append_rows(&path, &[row!["x", "1"]], ',').unwrap();
        append_rows(&path, &[row!["y", "2"]], ',').unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "x,1\ny,2\n");
    }

    #[test]
    fn append_terminates_an_unfinished_last_line() {
        let dir = tmp_dir("unterminated");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ledger.csv");
        fs::write(&path, "Fecha,Turno,Num1,Num2,Num3\n2024-01-14,Día,1,1,4").unwrap();
        append_rows(&path, &[row!["2024-01-15", "Día", "3", "7", "2"]], ',').unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Fecha,Turno,Num1,Num2,Num3\n2024-01-14,Día,1,1,4\n2024-01-15,Día,3,7,2\n"
        );
    }

    #[test]
    fn write_truncates() {
        let dir = tmp_dir("write");
        let path = dir.join("out.csv");
        write_rows(&path, &[row!["old"]], ',').unwrap();
        write_rows(&path, &[row!["new"]], ',').unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn file_in_place_of_directory_is_rejected() {
        let dir = tmp_dir("notdir");
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("blocker");
        fs::write(&blocker, "x").unwrap();
        let err = ensure_directory(&blocker).unwrap_err();
        assert!(matches!(err, LedgerError::NotADirectory(_)));
    }
}
