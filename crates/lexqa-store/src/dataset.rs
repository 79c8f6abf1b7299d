//! Question set persistence

use crate::{read_json, write_json_pretty, StoreError};
use lexqa_domain::QuestionRecord;
use std::path::Path;
use tracing::debug;

/// Load a question set from a JSON array file
///
/// Records are accepted as stored; no completeness check is applied.
pub fn load_questions(path: impl AsRef<Path>) -> Result<Vec<QuestionRecord>, StoreError> {
    let path = path.as_ref();
    let questions: Vec<QuestionRecord> = read_json(path)?;
    debug!("Loaded {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

/// Save a question set as a pretty-printed JSON array
///
/// Non-ASCII text is written as-is, not escaped.
pub fn save_questions(
    path: impl AsRef<Path>,
    questions: &[QuestionRecord],
) -> Result<(), StoreError> {
    let path = path.as_ref();
    write_json_pretty(path, questions)?;
    debug!("Saved {} questions to {}", questions.len(), path.display());
    Ok(())
}
