//! Whole-document pipeline: period year, row scan, normalization, classification.

use std::path::Path;

use passbook_core::{AccountKind, AccountProfile, StatementConfig, TransactionRecord};

use crate::assemble::RecordAssembler;
use crate::error::{IngestError, Result};
use crate::matcher::LineMatcher;
use crate::pages::PageSource;
use crate::period::PeriodResolver;

/// Parses statements of one account variant. Build once per batch and reuse.
pub struct StatementParser<'a> {
    resolver: PeriodResolver,
    matcher: LineMatcher,
    assembler: RecordAssembler<'a>,
    current_year: i32,
}

impl<'a> StatementParser<'a> {
    /// `current_year` bounds the two-digit year in the period header.
    pub fn new(config: &'a StatementConfig, kind: AccountKind, current_year: i32) -> Result<Self> {
        Ok(Self {
            resolver: PeriodResolver::new()?,
            matcher: LineMatcher::new()?,
            assembler: RecordAssembler::new(config, config.profile(kind))?,
            current_year,
        })
    }

    pub fn profile(&self) -> &AccountProfile {
        self.assembler.profile()
    }

    /// Records of one document, in row order. `document` names it in errors and logs.
    pub fn parse_pages<S: AsRef<str>>(&self, document: &str, pages: &[S]) -> Result<Vec<TransactionRecord>> {
        let year = self
            .resolver
            .document_year(pages, self.current_year)
            .ok_or_else(|| IngestError::UnresolvableYear {
                document: document.to_string(),
            })?;

        let rows = self.matcher.scan_pages(pages, self.profile());
        let records: Vec<_> = rows
            .iter()
            .filter_map(|row| self.assembler.assemble(row, year))
            .collect();

        log::debug!(
            "{}: year {}, {} matched rows, {} records",
            document,
            year,
            rows.len(),
            records.len()
        );
        Ok(records)
    }

    pub fn parse_file(&self, source: &dyn PageSource, path: &Path) -> Result<Vec<TransactionRecord>> {
        let pages = source.pages(path)?;
        self.parse_pages(&path.display().to_string(), &pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: &str = "First Community CU\nStatement Period 12/15/23 - 01/10/24\n";

    const CHECKING_PAGE: &str = "\
Date   Description                                   Amount     Balance
12-18  POS Debit - Debit Card 9825 Starbucks 12-18-23   4.75-    1,220.31
12-20  Deposit Payroll                               1,250.00    2,470.31
12-22  Transfer From Shares                            200.00    2,670.31
12-31  Dividend Earned                                   0.42    2,670.73
01-02  Paid To Verizon                                  80.00-   2,590.73
Membership Savings
01-05  Transfer From Checking                          100.00   10,100.00
";

    #[test]
    fn test_checking_document() {
        let cfg = StatementConfig::default();
        let parser = StatementParser::new(&cfg, AccountKind::Checking, 2026).unwrap();
        let recs = parser.parse_pages("jan.pdf", &[SUMMARY, CHECKING_PAGE]).unwrap();

        let descs: Vec<_> = recs.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descs, vec!["Starbucks", "Deposit Payroll", "Verizon"]);

        // Every row carries the end year, even December rows.
        assert!(recs.iter().all(|r| chrono::Datelike::year(&r.date) == 2024));
        assert_eq!(recs[0].category, "Food");
        assert_eq!(recs[1].inflow(), Some(1250.0));
        assert_eq!(recs[2].category, "Bills");
        assert_eq!(recs[2].outflow(), Some(-80.0));
    }

    #[test]
    fn test_share_transfer_removes_exactly_one_record() {
        let cfg = StatementConfig::default();
        let parser = StatementParser::new(&cfg, AccountKind::Checking, 2026).unwrap();
        let matched = LineMatcher::new()
            .unwrap()
            .scan_pages(&[SUMMARY, CHECKING_PAGE], &cfg.checking)
            .len();
        let recs = parser.parse_pages("jan.pdf", &[SUMMARY, CHECKING_PAGE]).unwrap();
        assert_eq!(recs.len(), matched - 1);
    }

    #[test]
    fn test_savings_document() {
        let cfg = StatementConfig::default();
        let parser = StatementParser::new(&cfg, AccountKind::Savings, 2026).unwrap();
        let recs = parser.parse_pages("jan.pdf", &[SUMMARY, CHECKING_PAGE]).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].description, "From Checking");
        assert_eq!(recs[0].category, "Savings");
        assert_eq!(recs[0].inflow(), Some(100.0));
    }

    #[test]
    fn test_exactly_one_direction_everywhere() {
        let cfg = StatementConfig::default();
        for kind in [AccountKind::Checking, AccountKind::Savings] {
            let parser = StatementParser::new(&cfg, kind, 2026).unwrap();
            for r in parser.parse_pages("jan.pdf", &[SUMMARY, CHECKING_PAGE]).unwrap() {
                assert!(r.inflow().is_some() ^ r.outflow().is_some());
            }
        }
    }

    #[test]
    fn test_missing_period_is_unresolvable() {
        let cfg = StatementConfig::default();
        let parser = StatementParser::new(&cfg, AccountKind::Checking, 2026).unwrap();
        let err = parser.parse_pages("feb.pdf", &["no header", CHECKING_PAGE]).unwrap_err();
        assert!(matches!(err, IngestError::UnresolvableYear { ref document } if document == "feb.pdf"));
    }
}
