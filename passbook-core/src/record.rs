//! Transaction record types shared by ingest and export.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a transaction. Exactly one column of the exported row is populated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flow {
    /// Money received
    Inflow(f64),
    /// Money spent
    Outflow(f64),
}

impl Flow {
    pub fn inflow(&self) -> Option<f64> {
        match self {
            Flow::Inflow(v) => Some(*v),
            Flow::Outflow(_) => None,
        }
    }

    pub fn outflow(&self) -> Option<f64> {
        match self {
            Flow::Outflow(v) => Some(*v),
            Flow::Inflow(_) => None,
        }
    }

    pub fn is_inflow(&self) -> bool {
        matches!(self, Flow::Inflow(_))
    }
}

/// A normalized, categorized statement transaction.
///
/// Serialized as a flat row (`Date`, `Transaction Detail`, `Category`, `Inflow`, `Outflow`)
/// so the same shape is used for JSON and CSV exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RecordRow", try_from = "RecordRow")]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub flow: Flow,
}

impl TransactionRecord {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        flow: Flow,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            category: category.into(),
            flow,
        }
    }

    pub fn inflow(&self) -> Option<f64> {
        self.flow.inflow()
    }

    pub fn outflow(&self) -> Option<f64> {
        self.flow.outflow()
    }
}

/// On-disk row shape of a [`TransactionRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    #[serde(rename = "Date", with = "statement_date")]
    pub date: NaiveDate,
    #[serde(rename = "Transaction Detail")]
    pub description: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Inflow")]
    pub inflow: Option<f64>,
    #[serde(rename = "Outflow")]
    pub outflow: Option<f64>,
}

impl From<TransactionRecord> for RecordRow {
    fn from(r: TransactionRecord) -> Self {
        Self {
            date: r.date,
            inflow: r.flow.inflow(),
            outflow: r.flow.outflow(),
            description: r.description,
            category: r.category,
        }
    }
}

/// A row that does not have exactly one direction column populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRow(pub String);

impl fmt::Display for InvalidRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid transaction row: {}", self.0)
    }
}

impl std::error::Error for InvalidRow {}

impl TryFrom<RecordRow> for TransactionRecord {
    type Error = InvalidRow;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let flow = match (row.inflow, row.outflow) {
            (Some(v), None) => Flow::Inflow(v),
            (None, Some(v)) => Flow::Outflow(v),
            (Some(_), Some(_)) => {
                return Err(InvalidRow(format!(
                    "'{}' has both Inflow and Outflow",
                    row.description
                )));
            }
            (None, None) => {
                return Err(InvalidRow(format!(
                    "'{}' has neither Inflow nor Outflow",
                    row.description
                )));
            }
        };
        Ok(Self {
            date: row.date,
            description: row.description,
            category: row.category,
            flow,
        })
    }
}

/// `MM-DD-YYYY` serde format used in every export.
pub mod statement_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%m-%d-%Y";

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDate::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }
}
