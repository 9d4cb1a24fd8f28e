/// One statement line that matched the transaction pattern, before any normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedLine {
    /// `MM-DD`, without a year.
    pub date: String,
    pub description: String,
    /// Amount as printed, e.g. `1,234.56-` for a debit.
    pub amount: String,
    /// Running balance as printed.
    pub balance: String,
}

impl MatchedLine {
    /// Signed amount: thousands separators removed, trailing `-` makes it negative.
    pub fn signed_amount(&self) -> Option<f64> {
        parse_statement_amount(&self.amount)
    }
}

/// Parse a printed statement amount (`1,234.56` or `1,234.56-`).
pub fn parse_statement_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let (digits, negative) = match raw.strip_suffix('-') {
        Some(rest) => (rest, true),
        None => (raw, false),
    };
    let value: f64 = digits.replace(',', "").parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amounts() {
        assert_eq!(parse_statement_amount("1,234.56-"), Some(-1234.56));
        assert_eq!(parse_statement_amount("10,000.00"), Some(10000.0));
        assert_eq!(parse_statement_amount("0.99"), Some(0.99));
        assert_eq!(parse_statement_amount("abc"), None);
    }
}
