//! Statement configuration: the category table plus one profile per account variant.
//!
//! Built once (from defaults or a config file) and passed by reference everywhere; nothing
//! mutates it after construction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::category::CategoryTable;

/// Account variant. Decides how the section marker and amount sign are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Marker ends the page scan; direction comes from description prefixes.
    Checking,
    /// Marker starts recognition; direction comes from the amount sign.
    Savings,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Checking => "checking",
            AccountKind::Savings => "savings",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub kind: AccountKind,
    /// Literal section marker line (e.g. "Membership Savings").
    pub section_marker: String,
    /// Literal substrings removed from descriptions, applied in order.
    #[serde(default)]
    pub noise: Vec<String>,
    /// Lines containing any of these (case-insensitive) are skipped before matching.
    #[serde(default)]
    pub skip_line_tokens: Vec<String>,
    /// Transactions whose description contains any of these are dropped (checking only).
    #[serde(default)]
    pub exclude_if_contains: Vec<String>,
    /// Description prefixes that mark an inflow (checking only).
    #[serde(default)]
    pub inflow_prefixes: Vec<String>,
    /// When set, every transaction gets this category and the table is not consulted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_override: Option<String>,
}

impl AccountProfile {
    pub fn checking() -> Self {
        Self {
            kind: AccountKind::Checking,
            section_marker: "Membership Savings".to_string(),
            noise: to_strings(&[
                "POS Debit - Debit Card 9825",
                "POS Debit - Debit Card 3834",
                "POS Debit-",
                "3834",
                "Paid To",
                "Debit Card",
                "POS Credit Adjustment 9825 Transaction",
                "Transaction",
                "-",
            ]),
            skip_line_tokens: to_strings(&["dividend"]),
            exclude_if_contains: to_strings(&["Transfer From Shares"]),
            inflow_prefixes: to_strings(&["Deposit", "Credit", "eDeposit", "Dividend"]),
            category_override: None,
        }
    }

    pub fn savings() -> Self {
        Self {
            kind: AccountKind::Savings,
            section_marker: "Membership Savings".to_string(),
            noise: to_strings(&["Transfer", "POS", "Transaction", "-"]),
            skip_line_tokens: Vec::new(),
            exclude_if_contains: Vec::new(),
            inflow_prefixes: Vec::new(),
            category_override: Some("Savings".to_string()),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementConfig {
    pub checking: AccountProfile,
    pub savings: AccountProfile,
    pub categories: CategoryTable,
}

impl StatementConfig {
    pub fn profile(&self, kind: AccountKind) -> &AccountProfile {
        match kind {
            AccountKind::Checking => &self.checking,
            AccountKind::Savings => &self.savings,
        }
    }

    /// Category for a normalized description under the given profile.
    pub fn categorize<'a>(&'a self, profile: &'a AccountProfile, description: &str) -> &'a str {
        match &profile.category_override {
            Some(fixed) => fixed,
            None => self.categories.classify(description),
        }
    }
}

impl Default for StatementConfig {
    fn default() -> Self {
        Self {
            checking: AccountProfile::checking(),
            savings: AccountProfile::savings(),
            categories: CategoryTable::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_lookup() {
        let cfg = StatementConfig::default();
        assert_eq!(cfg.profile(AccountKind::Checking).kind, AccountKind::Checking);
        assert_eq!(cfg.profile(AccountKind::Savings).kind, AccountKind::Savings);
    }

    #[test]
    fn test_savings_override_bypasses_table() {
        let cfg = StatementConfig::default();
        assert_eq!(cfg.categorize(&cfg.savings, "Starbucks"), "Savings");
        assert_eq!(cfg.categorize(&cfg.checking, "Starbucks"), "Food");
    }

    #[test]
    fn test_toml_roundtrip_preserves_category_order() {
        let cfg = StatementConfig::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        let back: StatementConfig = toml::from_str(&s).unwrap();
        assert_eq!(back, cfg);
        let names: Vec<_> = back.categories.names().collect();
        assert_eq!(names.first(), Some(&"Credit Cards"));
        assert_eq!(names.last(), Some(&"Savings"));
    }

    #[test]
    fn test_minimal_profile_from_toml() {
        let s = r#"
kind = "savings"
section_marker = "Share Savings"
"#;
        let p: AccountProfile = toml::from_str(s).unwrap();
        assert_eq!(p.kind, AccountKind::Savings);
        assert!(p.noise.is_empty());
        assert!(p.category_override.is_none());
    }
}
