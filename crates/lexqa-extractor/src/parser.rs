//! Parsing of model responses and answer key lines
//!
//! Both parsers are lenient: anything they cannot read is dropped and
//! reported, never raised.

use crate::types::{ChunkExtraction, ExtractionFailure};
use lexqa_domain::{AnswerKey, Choice, QuestionRecord};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{debug, warn};

static ANSWER_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s+([a-dA-D])").expect("answer pair pattern is valid"));

/// Parse an extraction response into question records
///
/// The response is split into blocks on blank lines. Inside a block, lines
/// made only of backticks, dots, commas and whitespace are dropped. A kept
/// block reads: id line, question line, then option lines `a)`..`d)`; other
/// lines are ignored. Blocks without exactly four non-empty options, or
/// whose first line is not a positive integer, become failures. A later
/// block with an id already seen replaces the earlier one.
///
/// # Examples
///
/// ```
/// use lexqa_extractor::parse_question_blocks;
///
/// let response = "12\n¿Capital de España?\na) Madrid\nb) Sevilla\nc) Bilbao\nd) Vigo";
/// let extraction = parse_question_blocks(response);
/// assert_eq!(extraction.questions[&12].question, "¿Capital de España?");
/// ```
pub fn parse_question_blocks(response: &str) -> ChunkExtraction {
    let mut extraction = ChunkExtraction::default();

    for block in split_blocks(response) {
        let lines: Vec<&str> = block
            .iter()
            .map(|line| line.trim())
            .filter(|line| !is_noise(line))
            .collect();
        if lines.is_empty() {
            continue;
        }

        match parse_block(&lines) {
            Ok(record) => {
                if extraction.questions.contains_key(&record.question_id) {
                    debug!("Question {} repeated in response, keeping the later block", record.question_id);
                }
                extraction.questions.insert(record.question_id, record);
            }
            Err(reason) => {
                warn!("Dropping question block: {}", reason);
                extraction.failures.push(ExtractionFailure {
                    reason,
                    raw_text: block.join("\n"),
                });
            }
        }
    }

    extraction
}

/// Parse the answer key line into an id → letter mapping
///
/// Every `<digits><whitespace><letter a-d>` pair is read left to right,
/// letters in any case. A later pair for the same id wins. A line with no
/// pairs yields an empty key.
///
/// # Examples
///
/// ```
/// use lexqa_domain::Choice;
/// use lexqa_extractor::parse_answer_key;
///
/// let key = parse_answer_key("1 a 2 B 10 c");
/// assert_eq!(key.get(2), Some(Choice::B));
/// assert_eq!(key.len(), 3);
/// ```
pub fn parse_answer_key(line: &str) -> AnswerKey {
    ANSWER_PAIR
        .captures_iter(line)
        .filter_map(|caps| {
            let id = caps[1].parse::<u32>().ok()?;
            let choice = caps[2].chars().next().and_then(Choice::from_char)?;
            Some((id, choice))
        })
        .collect()
}

fn split_blocks(response: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in response.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

fn is_noise(line: &str) -> bool {
    line.chars()
        .all(|c| matches!(c, '`' | '.' | ',') || c.is_whitespace())
}

fn parse_block(lines: &[&str]) -> Result<QuestionRecord, String> {
    if lines.len() < 3 {
        return Err(format!("expected at least 3 lines, got {}", lines.len()));
    }

    let question_id: u32 = lines[0]
        .parse()
        .map_err(|_| format!("invalid question id '{}'", lines[0]))?;
    if question_id == 0 {
        return Err("question id must be positive".to_string());
    }

    let options: BTreeMap<Choice, String> = lines[2..]
        .iter()
        .filter_map(|line| option_line(line))
        .filter(|(_, text)| !text.is_empty())
        .map(|(choice, text)| (choice, text.to_string()))
        .collect();

    let record = QuestionRecord::new(question_id, lines[1], options);
    if !record.is_complete() {
        return Err(format!(
            "question {}: expected 4 options, found {}",
            question_id,
            record.present_options().count()
        ));
    }

    Ok(record)
}

/// Split `a) text` into its letter and trimmed text; the prefix is
/// case-sensitive
fn option_line(line: &str) -> Option<(Choice, &str)> {
    let mut chars = line.chars();
    let letter = chars.next()?;
    if !matches!(letter, 'a'..='d') || chars.next()? != ')' {
        return None;
    }
    Some((Choice::from_char(letter)?, line[2..].trim()))
}
