// src/specs/draws.rs
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::options::{DateMode, RowScope};
use crate::core::html::{child_elements, has_class, selector, text_of};
use crate::core::sanitize::drop_first_token;
use crate::data::DrawRecord;
use crate::error::{ScrapeError, SkipReason};

use super::dates;

static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table.archives"));
static ROWS: LazyLock<Selector> = LazyLock::new(|| selector("tbody > tr"));
static CELLS: LazyLock<Selector> = LazyLock::new(|| selector("td"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static GROUPS: LazyLock<Selector> = LazyLock::new(|| selector("ul.balls"));

/// Output bundle: records in document order plus what was passed over.
#[derive(Debug, Default)]
pub struct ParsedPage {
    pub records: Vec<DrawRecord>,
    pub skips: Vec<ParseSkip>,
}

/// One row (or group within a row) that did not become a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSkip {
    pub row: usize,
    pub reason: SkipReason,
}

impl ParsedPage {
    fn skip(&mut self, row: usize, reason: SkipReason) {
        debug!(row, %reason, "skipping");
        self.skips.push(ParseSkip { row, reason });
    }
}

/// Parse a year results page.
///
/// Layout: `table.archives > tbody > tr`; first cell holds an `<a>` whose text
/// is "Weekday day month. year"; second cell holds one `ul.balls` per session.
///
/// Only a missing results table is an error. Rows and groups that fail are
/// recorded in `skips` and parsing moves on.
pub fn parse_doc(html_doc: &str, scope: RowScope, dates: DateMode) -> Result<ParsedPage, ScrapeError> {
    let doc = Html::parse_document(html_doc);
    let table = doc
        .select(&TABLE)
        .next()
        .ok_or_else(|| ScrapeError::ParseStructure(s!("results table (table.archives)")))?;

    let mut out = ParsedPage::default();

    for (i, tr) in table.select(&ROWS).enumerate() {
        if i > 0 && scope == RowScope::FirstRow {
            break;
        }

        let cells: Vec<ElementRef<'_>> = tr.select(&CELLS).collect();
        if cells.len() < 2 {
            out.skip(i, SkipReason::FewCells);
            continue;
        }

        let draw_date = match dates {
            DateMode::Ignored => None,
            DateMode::Required => match row_date(cells[0]) {
                Ok(d) => Some(d),
                Err(reason) => {
                    out.skip(i, reason);
                    continue;
                }
            },
        };

        let groups: Vec<ElementRef<'_>> = cells[1].select(&GROUPS).collect();

        match scope {
            RowScope::AllRows => {
                for group in groups {
                    match parse_group(group, draw_date) {
                        Ok(r) => out.records.push(r),
                        Err(reason) => out.skip(i, reason),
                    }
                }
            }
            RowScope::FirstRow | RowScope::SessionGroup(_) => {
                let want = match scope {
                    RowScope::SessionGroup(n) => n,
                    _ => 0,
                };
                let Some(group) = groups.get(want).copied() else {
                    out.skip(i, SkipReason::MissingGroup);
                    continue;
                };
                match parse_group(group, draw_date) {
                    Ok(r) => out.records.push(r),
                    Err(reason) => out.skip(i, reason),
                }
                // The first row that has the wanted group decides the outcome.
                break;
            }
        }
    }

    Ok(out)
}

/// Parse the year-less "latest results" page: the first `ul.balls` anywhere
/// in the document, no date.
pub fn parse_latest(html_doc: &str) -> Result<ParsedPage, ScrapeError> {
    let doc = Html::parse_document(html_doc);
    let group = doc
        .select(&GROUPS)
        .next()
        .ok_or_else(|| ScrapeError::ParseStructure(s!("number list (ul.balls)")))?;

    let mut out = ParsedPage::default();
    match parse_group(group, None) {
        Ok(r) => out.records.push(r),
        Err(reason) => out.skip(0, reason),
    }
    Ok(out)
}

/* ---------------- helpers ---------------- */

fn row_date(cell: ElementRef<'_>) -> Result<chrono::NaiveDate, SkipReason> {
    let anchor = cell.select(&ANCHOR).next().ok_or(SkipReason::MissingDate)?;
    let text = text_of(anchor);
    // Leading token is the weekday ("Miér."); need at least day, month and year after it.
    let raw = drop_first_token(&text, 3).ok_or_else(|| SkipReason::ShortDate(text.clone()))?;
    dates::normalize_es(&raw)
}

/// One `ul.balls` group → record.
///
/// A first item that is not a number is the session label ("Día", "Tarde")
/// and never counts as a digit. Items classed `ball` are the digits when any
/// are classed; otherwise every remaining item is.
fn parse_group(ul: ElementRef<'_>, draw_date: Option<chrono::NaiveDate>) -> Result<DrawRecord, SkipReason> {
    let items = child_elements(ul, "li");

    let mut session = None;
    let mut rest: &[ElementRef<'_>] = &items;
    if let Some(first) = items.first() {
        let txt = text_of(*first);
        if !txt.is_empty() && txt.parse::<i64>().is_err() {
            session = Some(txt);
            rest = &items[1..];
        }
    }

    let classed = rest.iter().any(|li| has_class(*li, "ball"));
    let values: Vec<String> = rest
        .iter()
        .filter(|li| !classed || has_class(**li, "ball"))
        .map(|li| text_of(*li))
        .collect();

    DrawRecord::new(draw_date, session, &values)
}
