//! Context corpus for retrieval
//!
//! A corpus is a JSON array of `{"data": {"text": ...}}` objects. The
//! builders here cut a statute into articles or a markdown code into `##`
//! sections, one document each.

use crate::{read_json, write_json_pretty, StoreError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

static ARTICLE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Artículo (\d+)\.").expect("article heading pattern is valid")
});

static SECTION_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"##[ \t]+([^\n]*)").expect("section heading pattern is valid")
});

/// Payload of a context document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentData {
    /// Passage text
    pub text: String,
}

/// One retrievable passage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextDocument {
    /// Document payload
    pub data: DocumentData,
}

impl ContextDocument {
    /// Wrap a passage
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            data: DocumentData { text: text.into() },
        }
    }

    /// Passage text
    pub fn text(&self) -> &str {
        &self.data.text
    }
}

/// Load a corpus file
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<ContextDocument>, StoreError> {
    let path = path.as_ref();
    let docs: Vec<ContextDocument> = read_json(path)?;
    debug!("Loaded {} context documents from {}", docs.len(), path.display());
    Ok(docs)
}

/// Save a corpus file
pub fn save_corpus(path: impl AsRef<Path>, docs: &[ContextDocument]) -> Result<(), StoreError> {
    write_json_pretty(path.as_ref(), docs)
}

/// Split a statute into one document per `Artículo N.` heading
///
/// Each document reads `"Artículo N. <body>"` with the body trimmed. Text
/// before the first heading is discarded.
///
/// # Examples
///
/// ```
/// use lexqa_store::split_articles;
///
/// let docs = split_articles("Preámbulo\nArtículo 1.\n España se constituye...\nArtículo 2. La Constitución...");
/// assert_eq!(docs.len(), 2);
/// assert_eq!(docs[0].text(), "Artículo 1. España se constituye...");
/// ```
pub fn split_articles(text: &str) -> Vec<ContextDocument> {
    split_on_headings(text, &ARTICLE_HEADING, |number, body| {
        format!("Artículo {}. {}", number, body)
    })
}

/// Split markdown into one document per `## Title` heading
///
/// Each document reads `"## <title>\n<body>"` with title and body trimmed.
pub fn split_markdown_sections(text: &str) -> Vec<ContextDocument> {
    split_on_headings(text, &SECTION_HEADING, |title, body| {
        format!("## {}\n{}", title.trim(), body)
    })
}

/// Cut `text` at every heading match; the body runs to the next heading
fn split_on_headings(
    text: &str,
    heading: &Regex,
    render: impl Fn(&str, &str) -> String,
) -> Vec<ContextDocument> {
    let matches: Vec<_> = heading.captures_iter(text).collect();

    matches
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            let label = caps.get(1).map_or("", |m| m.as_str());
            let body_end = matches
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(text.len(), |m| m.start());
            let body = text[whole.end()..body_end].trim();
            Some(ContextDocument::new(render(label, body)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_split_articles() {
        let text = "TÍTULO PRELIMINAR\n\nArtículo 1.\n1. España se constituye en un Estado social.\n\nArtículo 2.\nLa Constitución se fundamenta en la indisoluble unidad.\n";
        let docs = split_articles(text);

        assert_eq!(docs.len(), 2);
        assert_eq!(
            docs[0].text(),
            "Artículo 1. 1. España se constituye en un Estado social."
        );
        assert_eq!(
            docs[1].text(),
            "Artículo 2. La Constitución se fundamenta en la indisoluble unidad."
        );
    }

    #[test]
    fn test_split_articles_without_headings() {
        assert!(split_articles("Sin artículos aquí").is_empty());
        assert!(split_articles("").is_empty());
    }

    #[test]
    fn test_split_markdown_sections() {
        let text = "# Código\n\n## Título I\nDe los derechos.\n\n## Título II \nDe la Corona.";
        let docs = split_markdown_sections(text);

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].text(), "## Título I\nDe los derechos.");
        assert_eq!(docs[1].text(), "## Título II\nDe la Corona.");
    }

    #[test]
    fn test_corpus_file_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("articles.json");
        let docs = vec![ContextDocument::new("Artículo 1. Texto")];

        save_corpus(&path, &docs).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[0]["data"]["text"], "Artículo 1. Texto");

        assert_eq!(load_corpus(&path).unwrap(), docs);
    }
}
