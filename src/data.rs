// src/data.rs
//
// One parsed draw: optional date, optional session label, exactly three digits.
// Records are only built through `DrawRecord::new`, so a value of this type
// always satisfies the three-digit invariant.

use std::fmt;

use chrono::NaiveDate;

use crate::config::consts::DATE_FORMAT;
use crate::error::SkipReason;

pub type Digits = [u8; 3];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawRecord {
    pub draw_date: Option<NaiveDate>,
    pub session: Option<String>,
    digits: Digits,
}

impl DrawRecord {
    /// Build from the printed ball values. Anything other than exactly three
    /// values, each a single digit, is rejected as a whole.
    pub fn new<S: AsRef<str>>(
        draw_date: Option<NaiveDate>,
        session: Option<String>,
        values: &[S],
    ) -> Result<Self, SkipReason> {
        if values.len() != 3 {
            return Err(SkipReason::Malformed(format!(
                "expected 3 numbers, found {}",
                values.len()
            )));
        }
        let mut digits: Digits = [0; 3];
        for (slot, raw) in digits.iter_mut().zip(values) {
            let raw = raw.as_ref().trim();
            *slot = match raw.parse::<u8>() {
                Ok(d) if d <= 9 => d,
                _ => return Err(SkipReason::Malformed(format!("'{}' is not a digit", raw))),
            };
        }
        Ok(Self { draw_date, session, digits })
    }

    pub fn digits(&self) -> Digits {
        self.digits
    }

    /// Digits as ledger cells.
    pub fn digit_cells(&self) -> Vec<String> {
        self.digits.iter().map(|d| d.to_string()).collect()
    }

    /// `YYYY-MM-DD`, if the record carries a date.
    pub fn date_key(&self) -> Option<String> {
        self.draw_date.map(|d| d.format(DATE_FORMAT).to_string())
    }

    pub fn last_digit(&self) -> u8 {
        self.digits[2]
    }
}

impl fmt::Display for DrawRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.digits;
        write!(f, "[{a}, {b}, {c}]")?;
        if let Some(s) = &self.session {
            write!(f, " {s}")?;
        }
        if let Some(d) = self.date_key() {
            write!(f, " {d}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_three_digits() {
        let r = DrawRecord::new(None, None, &["3", " 7 ", "2"]).unwrap();
        assert_eq!(r.digits(), [3, 7, 2]);
        assert_eq!(r.digit_cells(), row!["3", "7", "2"]);
        assert_eq!(r.last_digit(), 2);
    }

    #[test]
    fn rejects_wrong_count_and_non_digits() {
        assert!(DrawRecord::new(None, None, &["1", "2"]).is_err());
        assert!(DrawRecord::new(None, None, &["1", "2", "3", "4"]).is_err());
        assert!(DrawRecord::new(None, None, &["1", "x", "3"]).is_err());
        assert!(DrawRecord::new(None, None, &["1", "10", "3"]).is_err());
        assert!(DrawRecord::new(None, None, &["-1", "0", "3"]).is_err());
    }

    #[test]
    fn display_and_date_key() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 15);
        let r = DrawRecord::new(d, Some(s!("Día")), &["3", "7", "2"]).unwrap();
        assert_eq!(r.date_key().as_deref(), Some("2024-01-15"));
        assert_eq!(r.to_string(), "[3, 7, 2] Día 2024-01-15");
    }
}
