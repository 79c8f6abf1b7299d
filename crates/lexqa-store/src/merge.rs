//! Merge categorized question sets across a dataset tree

use crate::{read_json, StoreError};
use lexqa_domain::{Category, QuestionRecord};
use std::path::{Path, PathBuf};
use serde_json::Value;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// File name the categorizer writes in each exam directory
pub const DATASET_FILE_NAME: &str = "categorized_questions.json";

/// Outcome of [`merge_and_filter`]
#[derive(Debug, Clone, PartialEq)]
pub struct MergeResult {
    /// Questions whose category matched, in discovery order
    pub questions: Vec<QuestionRecord>,
    /// Questions read across every merged file
    pub total_questions: usize,
    /// Files successfully merged
    pub files_merged: Vec<PathBuf>,
    /// Files that could not be read or decoded
    pub files_skipped: Vec<PathBuf>,
    /// Matching records that could not be decoded as questions
    pub records_skipped: usize,
}

/// Gather every [`DATASET_FILE_NAME`] under `input_dir` and keep the
/// questions in `category`
///
/// `category` is matched case-insensitively against each record's
/// `category` field, record by record, so a foreign or missing label never
/// costs the other records of its file. Only matching records are decoded;
/// one that fails is logged and counted. Files are visited in sorted path
/// order. A file that is not a JSON array is logged and skipped.
///
/// # Errors
///
/// Returns [`StoreError::InvalidData`] if `category` is not a taxonomy
/// label, and [`StoreError::Io`] if `input_dir` cannot be walked.
pub fn merge_and_filter(
    input_dir: impl AsRef<Path>,
    category: &str,
) -> Result<MergeResult, StoreError> {
    let input_dir = input_dir.as_ref();
    let target = Category::parse(category)
        .ok_or_else(|| StoreError::InvalidData(format!("Unknown category: {}", category)))?;

    let mut result = MergeResult {
        questions: Vec::new(),
        total_questions: 0,
        files_merged: Vec::new(),
        files_skipped: Vec::new(),
        records_skipped: 0,
    };

    for entry in WalkDir::new(input_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(input_dir).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
            StoreError::io(path, source)
        })?;

        if !entry.file_type().is_file() || entry.file_name() != DATASET_FILE_NAME {
            continue;
        }

        let path = entry.into_path();
        match read_json::<Vec<Value>>(&path) {
            Ok(records) => {
                result.total_questions += records.len();
                for record in records {
                    if record_category(&record) != Some(target) {
                        continue;
                    }
                    match serde_json::from_value::<QuestionRecord>(record) {
                        Ok(question) => result.questions.push(question),
                        Err(e) => {
                            warn!("Skipping record in {}: {}", path.display(), e);
                            result.records_skipped += 1;
                        }
                    }
                }
                result.files_merged.push(path);
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                result.files_skipped.push(path);
            }
        }
    }

    info!(
        "Found {} total questions, {} in category '{}'",
        result.total_questions,
        result.questions.len(),
        target.as_str()
    );
    Ok(result)
}

/// The record's category, if it names one from the taxonomy
fn record_category(record: &Value) -> Option<Category> {
    let label = record.get("category")?.as_str()?;
    let category = Category::parse(label);
    if category.is_none() {
        debug!("Record outside the taxonomy: {}", label);
    }
    category
}
