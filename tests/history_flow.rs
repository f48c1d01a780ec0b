// tests/history_flow.rs
use std::fs;
use std::path::PathBuf;

use loto_scrape::core::PageSource;
use loto_scrape::error::ScrapeError;
use loto_scrape::runner::{run_history, run_windows};
use loto_scrape::store::{CsvLedger, Ledger, MemoryLedger};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("loto_history_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

/// One row per page with Día and Tarde; the year comes from the URL.
/// 2021 is down.
struct Years;

impl PageSource for Years {
    fn get(&self, url: &str) -> Result<String, ScrapeError> {
        let year: i32 = url.rsplit('/').next().and_then(|y| y.parse().ok()).unwrap_or(0);
        if year == 2021 {
            return Err(ScrapeError::Status { url: url.to_string(), status: 500 });
        }
        let d = (year % 10) as u8;
        Ok(format!(
            r#"<table class="archives"><tbody>
              <tr><td><a>Vie. 31 dic. {year}</a></td><td>
                <ul class="balls"><li>Día</li><li class="ball">0</li><li class="ball">0</li><li class="ball">{d}</li></ul>
                <ul class="balls"><li>Tarde</li><li class="ball">0</li><li class="ball">1</li><li class="ball">{}</li></ul>
              </td></tr>
              <tr><td><a>Sáb. 1 ene. {year}</a></td><td>
                <ul class="balls"><li>Día</li><li class="ball">5</li><li class="ball">5</li><li class="ball">5</li></ul>
              </td></tr>
            </tbody></table>"#,
            (d + 1) % 10
        ))
    }
}

#[test]
fn history_writes_sorted_rows_and_reports_failed_years() {
    let dir = tmp_dir("csv");
    let path = dir.join("historial.csv");
    fs::write(&path, "stale,content\n").unwrap();
    let mut out = CsvLedger::new(&path);

    let report = run_history(&Years, "http://loto.test/r", 2020..=2022, &mut out, None).unwrap();
    assert_eq!(report.failed_years, vec![2021]);
    assert_eq!(report.rows_written, 6);
    assert_eq!(report.skipped_rows, 0);

    let rows = out.read_all_rows().unwrap();
    assert_eq!(rows[0], vec!["Fecha", "Turno", "Num1", "Num2", "Num3"]);
    assert_eq!(rows[1], vec!["2020-01-01", "Día", "5", "5", "5"]);
    assert_eq!(rows[2], vec!["2020-12-31", "Día", "0", "0", "0"]);
    assert_eq!(rows[3], vec!["2020-12-31", "Tarde", "0", "1", "1"]);
    assert_eq!(rows.last().unwrap(), &vec!["2022-12-31", "Tarde", "0", "1", "3"]);
}

#[test]
fn windows_slide_over_last_digits() {
    let mut out = MemoryLedger::default();
    let report = run_windows(&Years, "http://loto.test/r", 2020..=2022, 4, &mut out, None).unwrap();

    // Last digits in date order: 5 0 1 | 5 2 3
    assert_eq!(report.rows_written, 2);
    assert_eq!(out.rows()[0], vec!["x1", "x2", "x3", "x4", "y"]);
    assert_eq!(out.rows()[1], vec!["5", "0", "1", "5", "2"]);
    assert_eq!(out.rows()[2], vec!["0", "1", "5", "2", "3"]);
    assert_eq!(out.writes, 1);
}
