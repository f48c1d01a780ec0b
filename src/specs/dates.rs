// src/specs/dates.rs
//
// Spanish short-month dates as printed on the results page: "15 ene. 2024".

use chrono::NaiveDate;

use crate::config::consts::MESES;
use crate::error::SkipReason;

/// Replace the first table entry found in `raw` (table order, not text order)
/// with its two-digit month, then parse `day month year`.
///
/// Every occurrence of the matched abbreviation is replaced; later table
/// entries are not consulted.
pub fn normalize(raw: &str, table: &[(&str, &str)]) -> Result<NaiveDate, SkipReason> {
    let (abbr, num) = table
        .iter()
        .find(|(abbr, _)| raw.contains(abbr))
        .ok_or_else(|| SkipReason::UnrecognizedMonth(s!(raw)))?;

    let replaced = raw.replace(abbr, num);
    let compact = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDate::parse_from_str(&compact, "%d %m %Y").map_err(|_| SkipReason::BadDate(replaced))
}

/// `normalize` against the built-in month table.
pub fn normalize_es(raw: &str) -> Result<NaiveDate, SkipReason> {
    normalize(raw, MESES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn every_month_in_table() {
        for (i, (abbr, _)) in MESES.iter().enumerate() {
            let raw = format!("3 {abbr} 2023");
            assert_eq!(normalize_es(&raw).unwrap(), ymd(2023, i as u32 + 1, 3), "{raw}");
        }
    }

    #[test]
    fn single_digit_day_and_extra_spacing() {
        assert_eq!(normalize_es("5  dic.   2019").unwrap(), ymd(2019, 12, 5));
        assert_eq!(normalize_es("15 ene. 2024").unwrap(), ymd(2024, 1, 15));
    }

    #[test]
    fn unknown_month_is_reported() {
        assert_eq!(
            normalize_es("15 january 2024"),
            Err(SkipReason::UnrecognizedMonth(s!("15 january 2024")))
        );
        // Capitalised weekday "Mar." is not the month "mar."
        assert!(matches!(normalize_es("Mar. 15 2024"), Err(SkipReason::UnrecognizedMonth(_))));
    }

    #[test]
    fn table_order_wins_over_text_order() {
        // "mar." precedes "oct." in the table, so it is the one substituted,
        // leaving "oct." behind and failing the parse.
        let err = normalize_es("1 oct. mar. 2020").unwrap_err();
        assert_eq!(err, SkipReason::BadDate(s!("1 oct. 03 2020")));

        let custom = [("oct.", "10"), ("mar.", "03")];
        assert!(matches!(normalize("1 oct. mar. 2020", &custom), Err(SkipReason::BadDate(_))));
        assert_eq!(normalize("1 oct. 2020", &custom).unwrap(), ymd(2020, 10, 1));
    }

    #[test]
    fn garbage_after_substitution_fails() {
        assert!(matches!(normalize_es("ene. 2024"), Err(SkipReason::BadDate(_))));
        assert!(matches!(normalize_es("32 ene. 2024"), Err(SkipReason::BadDate(_))));
    }
}
