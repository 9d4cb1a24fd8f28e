//! Batch run over a folder of statements for one account variant.
//!
//! Layout under the output root:
//!   <out>/<variant>/work/json/<stem>.json   per-document exports (removed after merge)
//!   <out>/<variant>/work/csv/<stem>.csv
//!   <out>/<variant>/all<variant>.json        merged exports
//!   <out>/<variant>/all<variant>.csv

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use passbook_core::AccountKind;
use passbook_ingest::{PageSource, StatementParser};

use crate::cleanup::{CleanupReport, cleanup_folders};
use crate::csv_export::{merge_csv_exports, write_records_csv};
use crate::error::{ExportError, Result};
use crate::json_export::{merge_json_exports, write_records_json};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchLayout {
    pub variant_dir: PathBuf,
    pub work_dir: PathBuf,
    pub json_dir: PathBuf,
    pub csv_dir: PathBuf,
    pub merged_json: PathBuf,
    pub merged_csv: PathBuf,
}

impl BatchLayout {
    pub fn new(out_root: &Path, kind: AccountKind) -> Self {
        let variant_dir = out_root.join(kind.as_str());
        let work_dir = variant_dir.join("work");
        Self {
            json_dir: work_dir.join("json"),
            csv_dir: work_dir.join("csv"),
            merged_json: variant_dir.join(format!("all{}.json", kind)),
            merged_csv: variant_dir.join(format!("all{}.csv", kind)),
            work_dir,
            variant_dir,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub path: PathBuf,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub kind: AccountKind,
    pub processed: Vec<DocumentSummary>,
    pub skipped: Vec<SkippedDocument>,
    pub merged_json: PathBuf,
    pub merged_csv: PathBuf,
    pub merged_records: usize,
    /// `None` when the work directory was kept.
    pub cleanup: Option<CleanupReport>,
}

/// Statement files in `input_dir` that `source` can read, sorted by file name.
pub fn list_documents(input_dir: &Path, source: &dyn PageSource) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(input_dir).map_err(|source| ExportError::Input {
        path: input_dir.to_path_buf(),
        source,
    })?;

    let mut docs = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| ExportError::Input {
                path: input_dir.to_path_buf(),
                source,
            })?
            .path();
        if path.is_file() && source.accepts(&path) {
            docs.push(path);
        }
    }
    docs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(docs)
}

/// Per-document artifact name: the file stem, or the full file name when two inputs
/// share a stem (`may.pdf` and `may.txt`).
fn artifact_stem(doc: &Path, used: &mut HashSet<String>) -> String {
    let stem = doc
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "statement".to_string());
    if used.insert(stem.clone()) {
        return stem;
    }
    let full = doc
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or(stem);
    used.insert(full.clone());
    full
}

pub struct BatchRunner<'a> {
    parser: &'a StatementParser<'a>,
    source: &'a dyn PageSource,
    keep_work: bool,
}

impl<'a> BatchRunner<'a> {
    pub fn new(parser: &'a StatementParser<'a>, source: &'a dyn PageSource) -> Self {
        Self {
            parser,
            source,
            keep_work: false,
        }
    }

    /// Leave per-document exports in place after merging.
    pub fn keep_work(mut self, keep: bool) -> Self {
        self.keep_work = keep;
        self
    }

    pub fn run(&self, input_dir: &Path, out_root: &Path) -> Result<BatchSummary> {
        let kind = self.parser.profile().kind;
        let layout = BatchLayout::new(out_root, kind);
        let docs = list_documents(input_dir, self.source)?;
        log::info!("{}: {} documents in {}", kind, docs.len(), input_dir.display());

        for dir in [&layout.json_dir, &layout.csv_dir] {
            fs::create_dir_all(dir).map_err(|e| ExportError::io(dir.as_path(), e))?;
        }

        let mut processed = Vec::new();
        let mut skipped = Vec::new();
        let mut json_parts = Vec::new();
        let mut csv_parts = Vec::new();
        let mut used_stems = HashSet::new();

        for doc in &docs {
            let records = match self.parser.parse_file(self.source, doc) {
                Ok(records) => records,
                Err(e) => {
                    log::warn!("skipping {}: {}", doc.display(), e);
                    skipped.push(SkippedDocument {
                        path: doc.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let stem = artifact_stem(doc, &mut used_stems);
            let json_path = layout.json_dir.join(format!("{stem}.json"));
            let csv_path = layout.csv_dir.join(format!("{stem}.csv"));

            write_records_json(&json_path, &records)?;
            write_records_csv(&csv_path, &records)?;
            log::info!("{}: {} transactions from {}", kind, records.len(), doc.display());

            json_parts.push(json_path);
            csv_parts.push(csv_path);
            processed.push(DocumentSummary {
                path: doc.clone(),
                records: records.len(),
            });
        }

        let merged_records = merge_json_exports(&json_parts, &layout.merged_json)?;
        log::info!("merged {} transactions into {}", merged_records, layout.merged_json.display());
        let csv_records = merge_csv_exports(&csv_parts, &layout.merged_csv)?;
        log::info!("merged {} transactions into {}", csv_records, layout.merged_csv.display());
        if csv_records != merged_records {
            return Err(ExportError::malformed(
                &layout.merged_csv,
                format!("{csv_records} rows merged, expected {merged_records}"),
            ));
        }

        let cleanup = if self.keep_work {
            None
        } else {
            Some(cleanup_folders(&[&layout.json_dir, &layout.csv_dir, &layout.work_dir]))
        };

        Ok(BatchSummary {
            kind,
            processed,
            skipped,
            merged_json: layout.merged_json,
            merged_csv: layout.merged_csv,
            merged_records,
            cleanup,
        })
    }
}
