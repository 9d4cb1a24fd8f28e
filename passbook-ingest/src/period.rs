//! Statement period header: the only place a statement prints a full year.
//!
//! Expected text somewhere in the document:
//!   Statement Period 12/15/23 - 01/10/24
//!
//! Transaction rows only carry MM-DD, so the end date's year becomes the year of every
//! transaction in the document.

use chrono::NaiveDate;
use regex::Regex;

use crate::error::Result;

/// A calendar date from the period header, after year corrections.
///
/// Kept as plain fields because a corrected year can turn Feb 29 into a non-date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementPeriod {
    pub start: PeriodDate,
    pub end: PeriodDate,
}

impl StatementPeriod {
    /// Year attached to every transaction of the document.
    pub fn document_year(&self) -> i32 {
        self.end.year
    }

    /// Apply the two-digit-year corrections against `current_year`.
    pub fn corrected(mut self, current_year: i32) -> Self {
        if self.end.year > current_year {
            self.end.year -= 1;
        }
        if self.start.year > current_year {
            self.start.year -= 1;
        }
        if self.end.month < self.start.month {
            self.start.year -= 1;
        }
        self
    }
}

/// Parse `MM/DD/YY`. Two-digit years pivot like `%y`: 00-68 -> 20xx, 69-99 -> 19xx.
fn parse_mm_dd_yy(s: &str) -> Option<PeriodDate> {
    let mut it = s.trim().split('/');
    let month: u32 = it.next()?.parse().ok()?;
    let day: u32 = it.next()?.parse().ok()?;
    let yy: i32 = it.next()?.parse().ok()?;
    if it.next().is_some() {
        return None;
    }
    let year = if yy < 69 { 2000 + yy } else { 1900 + yy };
    NaiveDate::from_ymd_opt(year, month, day)?;
    Some(PeriodDate { year, month, day })
}

pub struct PeriodResolver {
    header_re: Regex,
}

impl PeriodResolver {
    pub fn new() -> Result<Self> {
        let header_re = Regex::new(
            r"Statement Period\s+(?P<start>\d{2}/\d{2}/\d{2})\s*-\s*(?P<end>\d{2}/\d{2}/\d{2})",
        )?;
        Ok(Self { header_re })
    }

    /// Find the first parseable period header, searching pages in order.
    pub fn resolve<S: AsRef<str>>(&self, pages: &[S], current_year: i32) -> Option<StatementPeriod> {
        for page in pages {
            for caps in self.header_re.captures_iter(page.as_ref()) {
                let (Some(start), Some(end)) =
                    (parse_mm_dd_yy(&caps["start"]), parse_mm_dd_yy(&caps["end"]))
                else {
                    log::debug!("ignoring unparseable period header: {}", &caps[0]);
                    continue;
                };
                return Some(StatementPeriod { start, end }.corrected(current_year));
            }
        }
        None
    }

    /// Document year, or `None` when no header is present.
    pub fn document_year<S: AsRef<str>>(&self, pages: &[S], current_year: i32) -> Option<i32> {
        self.resolve(pages, current_year).map(|p| p.document_year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(text: &str, current_year: i32) -> Option<StatementPeriod> {
        PeriodResolver::new().unwrap().resolve(&[text], current_year)
    }

    #[test]
    fn test_same_year_period_keeps_end_year() {
        let p = resolve("Acct 1234\nStatement Period 03/01/24 - 03/31/24\n", 2026).unwrap();
        assert_eq!(p.document_year(), 2024);
        assert_eq!(p.start, PeriodDate { year: 2024, month: 3, day: 1 });
        assert_eq!(p.end, PeriodDate { year: 2024, month: 3, day: 31 });
    }

    #[test]
    fn test_cross_year_period_corrects_start_only() {
        let p = resolve("Statement Period 12/15/23 - 01/10/24", 2026).unwrap();
        assert_eq!(p.document_year(), 2024);
        assert_eq!(p.start.year, 2022);
        assert_eq!(p.end.year, 2024);
    }

    #[test]
    fn test_future_year_rolls_back() {
        // 27 is after the current year, so both dates step back one year.
        let p = resolve("Statement Period 04/01/27 - 04/30/27", 2026).unwrap();
        assert_eq!(p.document_year(), 2026);
        assert_eq!(p.start.year, 2026);
    }

    #[test]
    fn test_two_digit_year_pivot() {
        let p = resolve("Statement Period 01/01/99 - 01/31/99", 2026).unwrap();
        assert_eq!(p.document_year(), 1999);
    }

    #[test]
    fn test_header_spacing_variants() {
        let p = resolve("Statement Period   05/01/24-05/31/24", 2026).unwrap();
        assert_eq!(p.document_year(), 2024);
    }

    #[test]
    fn test_header_found_on_later_page() {
        let r = PeriodResolver::new().unwrap();
        let pages = ["Summary page", "Statement Period 06/01/25 - 06/30/25"];
        assert_eq!(r.document_year(&pages, 2026), Some(2025));
    }

    #[test]
    fn test_invalid_header_date_is_skipped() {
        let r = PeriodResolver::new().unwrap();
        let pages = ["Statement Period 13/45/24 - 01/31/24", "Statement Period 02/01/24 - 02/29/24"];
        assert_eq!(r.document_year(&pages, 2026), Some(2024));
    }

    #[test]
    fn test_missing_header() {
        assert!(resolve("no header here", 2026).is_none());
    }
}
