//! Errors raised while turning one statement document into records.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    /// No "Statement Period MM/DD/YY - MM/DD/YY" header on any page.
    #[error("statement period not found in {document}")]
    UnresolvableYear { document: String },

    /// The document could not be opened or its text could not be extracted.
    #[error("failed to extract text from {}: {reason}", path.display())]
    Extract { path: PathBuf, reason: String },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
