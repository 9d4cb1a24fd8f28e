//! Transaction line scanner for credit-union statement text.
//!
//! Expected extracted-text rows (page 2 onward):
//!   05-01  POS Debit - Debit Card 9825 Starbucks 05-01-24      4.75-     1,220.31
//!   05-03  Deposit Payroll                                  1,250.00      2,470.31
//!   Membership Savings
//!   05-15  Transfer From Checking                             100.00     10,100.00
//!
//! The first page is a summary and never contains rows.

use regex::Regex;

use passbook_core::{AccountKind, AccountProfile};

use crate::error::Result;
use crate::types::MatchedLine;

pub struct LineMatcher {
    txn_re: Regex,
}

impl LineMatcher {
    pub fn new() -> Result<Self> {
        // DATE DESCRIPTION AMOUNT[-] BALANCE
        let txn_re = Regex::new(concat!(
            r"^\s*(?P<date>\d{2}-\d{2})\s+",
            r"(?P<desc>.+?)\s+",
            r"(?P<amount>[\d,]+\.\d{2}-?)\s+",
            r"(?P<balance>[\d,]+\.\d{2})\s*$"
        ))?;
        Ok(Self { txn_re })
    }

    /// Match a single line; `None` for headers, footers and anything else.
    pub fn match_line(&self, line: &str) -> Option<MatchedLine> {
        let caps = self.txn_re.captures(line)?;
        Some(MatchedLine {
            date: caps["date"].to_string(),
            description: caps["desc"].trim().to_string(),
            amount: caps["amount"].to_string(),
            balance: caps["balance"].to_string(),
        })
    }

    /// Scan every page after the first and collect matching rows in document order.
    pub fn scan_pages<S: AsRef<str>>(&self, pages: &[S], profile: &AccountProfile) -> Vec<MatchedLine> {
        let skip_tokens: Vec<String> = profile
            .skip_line_tokens
            .iter()
            .map(|t| t.to_lowercase())
            .collect();

        // Savings rows only start after the section marker; the flag survives page breaks.
        let mut in_section = false;
        let mut out = Vec::new();

        for page in pages.iter().skip(1) {
            for line in page.as_ref().lines() {
                if line.contains(profile.section_marker.as_str()) {
                    match profile.kind {
                        AccountKind::Checking => break,
                        AccountKind::Savings => {
                            in_section = true;
                            continue;
                        }
                    }
                }

                if profile.kind == AccountKind::Savings && !in_section {
                    continue;
                }

                if !skip_tokens.is_empty() {
                    let lower = line.to_lowercase();
                    if skip_tokens.iter().any(|t| lower.contains(t.as_str())) {
                        log::debug!("skipping line: {}", line.trim());
                        continue;
                    }
                }

                if let Some(m) = self.match_line(line) {
                    out.push(m);
                }
            }
        }

        out
    }
}
