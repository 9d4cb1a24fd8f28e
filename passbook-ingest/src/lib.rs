//! passbook-ingest: statement text ingestion: period year, row matching, description
//! cleanup, and record assembly for checking and savings statements.

pub mod assemble;
pub mod document;
pub mod error;
pub mod matcher;
pub mod normalize;
pub mod pages;
mod pdf_text;
pub mod period;
pub mod types;

pub use assemble::RecordAssembler;
pub use document::StatementParser;
pub use error::{IngestError, Result};
pub use matcher::LineMatcher;
pub use normalize::DescriptionNormalizer;
pub use pages::{AnySource, PageSource, PdfPages, TextPages};
pub use period::{PeriodDate, PeriodResolver, StatementPeriod};
pub use types::{MatchedLine, parse_statement_amount};
