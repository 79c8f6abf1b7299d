//! Question module - the canonical unit of an exam dataset

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::Category;

/// An option letter of a multiple-choice question
///
/// Serialized as the lowercase letter (`"a"`), both as a value and as a
/// JSON object key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    /// Option `a`
    A,
    /// Option `b`
    B,
    /// Option `c`
    C,
    /// Option `d`
    D,
}

impl Choice {
    /// All choices in letter order
    pub const ALL: [Choice; 4] = [Choice::A, Choice::B, Choice::C, Choice::D];

    /// The lowercase letter for this choice
    pub fn as_char(&self) -> char {
        match self {
            Choice::A => 'a',
            Choice::B => 'b',
            Choice::C => 'c',
            Choice::D => 'd',
        }
    }

    /// Parse a letter, ignoring case
    ///
    /// # Examples
    ///
    /// ```
    /// use lexqa_domain::Choice;
    ///
    /// assert_eq!(Choice::from_char('B'), Some(Choice::B));
    /// assert_eq!(Choice::from_char('e'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'a' => Some(Choice::A),
            'b' => Some(Choice::B),
            'c' => Some(Choice::C),
            'd' => Some(Choice::D),
            _ => None,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl std::str::FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c).ok_or_else(|| format!("Invalid choice: {}", s)),
            _ => Err(format!("Invalid choice: {}", s)),
        }
    }
}

/// A multiple-choice exam question
///
/// The id is assigned by extraction and never renumbered afterwards.
/// Records produced by extraction always carry four non-empty options;
/// records loaded from disk are taken as they are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Question number within its source document
    pub question_id: u32,

    /// Question text
    pub question: String,

    /// Option texts keyed by letter
    pub options: BTreeMap<Choice, String>,

    /// Correct letter, unset until joined from the answer key
    #[serde(default)]
    pub correct_answer: Option<Choice>,

    /// Legal subdomain, absent until categorized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl QuestionRecord {
    /// Create an uncategorized record without a correct answer
    pub fn new(
        question_id: u32,
        question: impl Into<String>,
        options: BTreeMap<Choice, String>,
    ) -> Self {
        Self {
            question_id,
            question: question.into(),
            options,
            correct_answer: None,
            category: None,
        }
    }

    /// True when all four letters carry non-empty text
    pub fn is_complete(&self) -> bool {
        Choice::ALL.iter().all(|choice| {
            self.options
                .get(choice)
                .map_or(false, |text| !text.trim().is_empty())
        })
    }

    /// Options with non-empty text, in letter order
    pub fn present_options(&self) -> impl Iterator<Item = (Choice, &str)> {
        self.options
            .iter()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(choice, text)| (*choice, text.as_str()))
    }

    /// True once a category has been assigned
    pub fn is_categorized(&self) -> bool {
        self.category.is_some()
    }
}
