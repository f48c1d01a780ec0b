// src/csv.rs
//
// Ledger rows as CSV text. Reads tolerate what spreadsheets export: CRLF,
// blank lines, quoted cells, a missing final newline.

use std::borrow::Cow;
use std::io::{self, Write};
use std::mem::take;

/* ---------------- Reading ---------------- */

#[derive(Clone, Copy, PartialEq, Eq)]
enum Cell {
    Plain,
    Quoted,
    /// Saw `"` inside a quoted cell: either an escaped quote or the closing one.
    QuoteInQuoted,
}

/// Split ledger text into rows. Blank lines are dropped; an unterminated
/// quote runs to the end of the text.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = s!();
    let mut state = Cell::Plain;

    let mut end_row = |row: &mut Vec<String>, cell: &mut String| {
        row.push(take(cell));
        let blank = row.len() == 1 && row[0].is_empty();
        if blank {
            row.clear();
        } else {
            rows.push(take(row));
        }
    };

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        state = match (state, ch) {
            (Cell::Quoted, '"') => Cell::QuoteInQuoted,
            (Cell::Quoted, c) => {
                cell.push(c);
                Cell::Quoted
            }
            (Cell::QuoteInQuoted, '"') => {
                cell.push('"');
                Cell::Quoted
            }
            (Cell::Plain | Cell::QuoteInQuoted, '"') if cell.is_empty() => Cell::Quoted,
            (Cell::Plain | Cell::QuoteInQuoted, c) if c == sep => {
                row.push(take(&mut cell));
                Cell::Plain
            }
            (Cell::Plain | Cell::QuoteInQuoted, '\r' | '\n') => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                end_row(&mut row, &mut cell);
                Cell::Plain
            }
            (Cell::Plain | Cell::QuoteInQuoted, c) => {
                cell.push(c);
                Cell::Plain
            }
        };
    }

    if !cell.is_empty() || !row.is_empty() {
        end_row(&mut row, &mut cell);
    }
    rows
}

/// True when appending to `text` would glue the new row onto its last line.
pub fn needs_line_break(text: &[u8]) -> bool {
    text.last().is_some_and(|b| *b != b'\n')
}

/* ---------------- Writing ---------------- */

fn escape(cell: &str, sep: char) -> Cow<'_, str> {
    if cell.contains([sep, '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Write one row, newline-terminated.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{sep}")?;
        }
        w.write_all(escape(cell, sep).as_bytes())?;
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quotes_crlf_and_blank_lines() {
        let text = "Fecha,Turno,Num1\r\n2024-01-15,\"Día, 1\",3\n\n2024-01-16,\"a \"\"b\"\"\",4";
        let rows = parse_rows(text, ',');
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], row!["2024-01-15", "Día, 1", "3"]);
        assert_eq!(rows[2], row!["2024-01-16", "a \"b\"", "4"]);
    }

    #[test]
    fn empty_text_has_no_rows() {
        assert!(parse_rows("", ',').is_empty());
        assert!(parse_rows("\n\r\n", ',').is_empty());
    }

    #[test]
    fn trailing_empty_cell_is_kept() {
        assert_eq!(parse_rows("2024-01-15,,3\n", ','), vec![row!["2024-01-15", "", "3"]]);
    }

    #[test]
    fn writer_quotes_only_when_needed() {
        let mut buf = Vec::new();
        write_row(&mut buf, &row!["2024-01-15 10:00:00", "a,b", "say \"hi\""], ',').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "2024-01-15 10:00:00,\"a,b\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn line_break_needed_only_after_unterminated_line() {
        assert!(!needs_line_break(b""));
        assert!(!needs_line_break(b"a,1\n"));
        assert!(needs_line_break(b"a,1"));
        assert!(needs_line_break(b"a,1\r"));
    }
}
