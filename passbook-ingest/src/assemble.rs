//! Turn matched rows into directional, categorized records.

use chrono::NaiveDate;

use passbook_core::{AccountKind, AccountProfile, Flow, StatementConfig, TransactionRecord};

use crate::error::Result;
use crate::normalize::DescriptionNormalizer;
use crate::types::MatchedLine;

fn parse_mm_dd_with_year(s: &str, year: i32) -> Option<NaiveDate> {
    let mut it = s.trim().split('-');
    let m: u32 = it.next()?.parse().ok()?;
    let d: u32 = it.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, m, d)
}

/// Negate without producing `-0.0`.
fn negated(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { -v }
}

pub struct RecordAssembler<'a> {
    config: &'a StatementConfig,
    profile: &'a AccountProfile,
    normalizer: DescriptionNormalizer,
}

impl<'a> RecordAssembler<'a> {
    pub fn new(config: &'a StatementConfig, profile: &'a AccountProfile) -> Result<Self> {
        Ok(Self {
            config,
            profile,
            normalizer: DescriptionNormalizer::new(&profile.noise)?,
        })
    }

    pub fn profile(&self) -> &AccountProfile {
        self.profile
    }

    /// Build a record, or `None` when the row is excluded or carries an impossible date.
    pub fn assemble(&self, line: &MatchedLine, year: i32) -> Option<TransactionRecord> {
        let Some(date) = parse_mm_dd_with_year(&line.date, year) else {
            log::debug!("skipping row with invalid date {}-{}", line.date, year);
            return None;
        };
        let Some(amount) = line.signed_amount() else {
            log::debug!("skipping row with unparseable amount {}", line.amount);
            return None;
        };

        let detail = self.normalizer.normalize(&line.description);

        let flow = match self.profile.kind {
            AccountKind::Checking => {
                if self
                    .profile
                    .exclude_if_contains
                    .iter()
                    .any(|x| detail.contains(x.as_str()))
                {
                    log::debug!("excluding internal transfer: {}", detail);
                    return None;
                }
                // Printed sign is ignored; the description decides direction.
                let amount = amount.abs();
                if self
                    .profile
                    .inflow_prefixes
                    .iter()
                    .any(|p| detail.starts_with(p.as_str()))
                {
                    Flow::Inflow(amount)
                } else {
                    Flow::Outflow(negated(amount))
                }
            }
            AccountKind::Savings => {
                if amount > 0.0 {
                    Flow::Inflow(amount)
                } else {
                    Flow::Outflow(negated(amount))
                }
            }
        };

        let category = self.config.categorize(self.profile, &detail).to_string();
        Some(TransactionRecord::new(date, detail, category, flow))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, desc: &str, amount: &str) -> MatchedLine {
        MatchedLine {
            date: date.to_string(),
            description: desc.to_string(),
            amount: amount.to_string(),
            balance: "10,000.00".to_string(),
        }
    }

    #[test]
    fn test_checking_outflow_is_negated_and_categorized() {
        let cfg = StatementConfig::default();
        let asm = RecordAssembler::new(&cfg, &cfg.checking).unwrap();
        let rec = asm
            .assemble(&row("05-01", "POS Debit - Debit Card 9825 Starbucks 05-01-24", "4.75-"), 2024)
            .unwrap();
        assert_eq!(rec.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(rec.description, "Starbucks");
        assert_eq!(rec.category, "Food");
        assert_eq!(rec.inflow(), None);
        assert_eq!(rec.outflow(), Some(-4.75));
    }

    #[test]
    fn test_checking_deposit_is_inflow_regardless_of_sign() {
        let cfg = StatementConfig::default();
        let asm = RecordAssembler::new(&cfg, &cfg.checking).unwrap();
        for amount in ["1,250.00", "1,250.00-"] {
            let rec = asm.assemble(&row("05-03", "Deposit Payroll", amount), 2024).unwrap();
            assert_eq!(rec.inflow(), Some(1250.0));
            assert_eq!(rec.outflow(), None);
        }
    }

    #[test]
    fn test_checking_inflow_prefixes() {
        let cfg = StatementConfig::default();
        let asm = RecordAssembler::new(&cfg, &cfg.checking).unwrap();
        for desc in ["Credit Interest", "eDeposit Mobile", "Dividend Paid"] {
            let rec = asm.assemble(&row("05-03", desc, "5.00"), 2024).unwrap();
            assert!(rec.flow.is_inflow(), "{desc} should be inflow");
        }
        // Prefix only, not anywhere in the text.
        let rec = asm.assemble(&row("05-03", "Mobile Deposit", "5.00"), 2024).unwrap();
        assert!(!rec.flow.is_inflow());
    }

    #[test]
    fn test_checking_excludes_share_transfers() {
        let cfg = StatementConfig::default();
        let asm = RecordAssembler::new(&cfg, &cfg.checking).unwrap();
        assert!(asm.assemble(&row("05-04", "Transfer From Shares", "100.00"), 2024).is_none());
    }

    #[test]
    fn test_savings_sign_decides_direction() {
        let cfg = StatementConfig::default();
        let asm = RecordAssembler::new(&cfg, &cfg.savings).unwrap();

        let out = asm.assemble(&row("05-20", "Withdrawal", "1,234.56-"), 2024).unwrap();
        assert_eq!(out.outflow(), Some(1234.56));
        assert_eq!(out.inflow(), None);
        assert_eq!(out.category, "Savings");

        let inc = asm.assemble(&row("05-05", "Transfer From Checking", "100.00"), 2024).unwrap();
        assert_eq!(inc.inflow(), Some(100.0));
        assert_eq!(inc.description, "From Checking");
    }

    #[test]
    fn test_savings_zero_amount_goes_to_outflow() {
        let cfg = StatementConfig::default();
        let asm = RecordAssembler::new(&cfg, &cfg.savings).unwrap();
        let rec = asm.assemble(&row("05-31", "Adjustment", "0.00"), 2024).unwrap();
        assert_eq!(rec.inflow(), None);
        let out = rec.outflow().unwrap();
        assert_eq!(out, 0.0);
        assert!(out.is_sign_positive());
    }

    #[test]
    fn test_impossible_date_is_dropped() {
        let cfg = StatementConfig::default();
        let asm = RecordAssembler::new(&cfg, &cfg.checking).unwrap();
        assert!(asm.assemble(&row("02-30", "Wawa", "1.00-"), 2024).is_none());
        assert!(asm.assemble(&row("02-29", "Wawa", "1.00-"), 2024).is_some());
    }
}
