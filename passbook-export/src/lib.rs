//! passbook-export: JSON/CSV exports, merge, cleanup, and the batch runner

pub mod batch;
pub mod cleanup;
pub mod csv_export;
pub mod error;
pub mod json_export;

pub use batch::{BatchLayout, BatchRunner, BatchSummary, DocumentSummary, SkippedDocument, list_documents};
pub use cleanup::{CleanupFailure, CleanupReport, cleanup_folders};
pub use csv_export::{CSV_HEADER, merge_csv_exports, read_records_csv, write_records_csv};
pub use error::{ExportError, Result};
pub use json_export::{merge_json_exports, read_records_json, write_records_json};
