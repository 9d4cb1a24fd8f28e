//! Page text sources. A statement is consumed as one plain-text string per page.

use std::fs;
use std::path::Path;

use lopdf::Document;

use crate::error::{IngestError, Result};
use crate::pdf_text::page_text;

/// Produces per-page text for a statement file.
pub trait PageSource {
    /// Whether this source can read the given file (usually by extension).
    fn accepts(&self, path: &Path) -> bool;

    /// Text of each page, in page order, with line breaks preserved.
    fn pages(&self, path: &Path) -> Result<Vec<String>>;
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// PDF statements, text rebuilt per page from the content stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfPages;

impl PageSource for PdfPages {
    fn accepts(&self, path: &Path) -> bool {
        has_extension(path, "pdf")
    }

    fn pages(&self, path: &Path) -> Result<Vec<String>> {
        let doc = Document::load(path).map_err(|e| IngestError::Extract {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut out = Vec::new();
        for (page_num, page_id) in doc.get_pages() {
            match page_text(&doc, page_id) {
                Ok(text) => out.push(text),
                Err(e) => {
                    // Keep page numbering stable so "skip the first page" still means page 1.
                    log::warn!("failed to extract text from page {} of {}: {}", page_num, path.display(), e);
                    out.push(String::new());
                }
            }
        }
        Ok(out)
    }
}

/// Pre-extracted statement text: UTF-8, pages separated by form feeds (`\x0C`).
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPages;

impl TextPages {
    pub fn split(text: &str) -> Vec<String> {
        text.split('\u{000C}').map(|s| s.to_string()).collect()
    }
}

impl PageSource for TextPages {
    fn accepts(&self, path: &Path) -> bool {
        has_extension(path, "txt")
    }

    fn pages(&self, path: &Path) -> Result<Vec<String>> {
        let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::split(&text))
    }
}

/// Dispatches to the first source that accepts the file.
pub struct AnySource {
    sources: Vec<Box<dyn PageSource>>,
}

impl AnySource {
    pub fn new(sources: Vec<Box<dyn PageSource>>) -> Self {
        Self { sources }
    }
}

impl Default for AnySource {
    fn default() -> Self {
        Self::new(vec![Box::new(PdfPages), Box::new(TextPages)])
    }
}

impl PageSource for AnySource {
    fn accepts(&self, path: &Path) -> bool {
        self.sources.iter().any(|s| s.accepts(path))
    }

    fn pages(&self, path: &Path) -> Result<Vec<String>> {
        match self.sources.iter().find(|s| s.accepts(path)) {
            Some(source) => source.pages(path),
            None => Err(IngestError::Extract {
                path: path.to_path_buf(),
                reason: "unsupported file type".to_string(),
            }),
        }
    }
}
