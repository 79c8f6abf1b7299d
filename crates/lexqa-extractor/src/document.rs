//! Raw exam text split into body and answer key line

/// An exam file as read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Everything before the answer key line
    pub body: String,

    /// The last non-blank line
    pub answer_key_line: String,
}

impl RawDocument {
    /// Split raw text
    ///
    /// Trailing blank lines are skipped when locating the key line, so a file
    /// ending in a newline still yields its key. A single-line file is all
    /// key and no body.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim_end();
        match trimmed.rfind('\n') {
            Some(pos) => Self {
                body: trimmed[..pos].trim_end_matches('\r').to_string(),
                answer_key_line: trimmed[pos + 1..].trim().to_string(),
            },
            None => Self {
                body: String::new(),
                answer_key_line: trimmed.trim().to_string(),
            },
        }
    }
}
