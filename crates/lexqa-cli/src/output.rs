//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use lexqa_domain::{Choice, QuestionRecord};
use lexqa_eval::{CategorizeSummary, EvaluationReport};
use lexqa_store::MergeResult;
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Question text shown in a table cell, in characters
const QUESTION_WIDTH: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a question set.
    pub fn format_questions(&self, questions: &[QuestionRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(questions)?),
            OutputFormat::Table => Ok(self.format_questions_table(questions)),
            OutputFormat::Quiet => Ok(questions
                .iter()
                .map(|q| q.question_id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_questions_table(&self, questions: &[QuestionRecord]) -> String {
        if questions.is_empty() {
            return self.colorize("No questions found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Question", "Answer", "Category"]);

        for question in questions {
            builder.push_record([
                question.question_id.to_string(),
                truncate(&question.question, QUESTION_WIDTH),
                letter(question.correct_answer),
                question
                    .category
                    .map_or_else(|| "-".to_string(), |c| c.label().to_string()),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format an evaluation report.
    ///
    /// The table form shows the summary followed by every question that
    /// was not answered correctly.
    pub fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(format!("{:.2}", report.accuracy)),
            OutputFormat::Table => Ok(self.format_report_table(report)),
        }
    }

    fn format_report_table(&self, report: &EvaluationReport) -> String {
        let mut summary = Builder::default();
        summary.push_record(["Accuracy", "Total Questions", "Correct Answers"]);
        summary.push_record([
            format!("{:.2}%", report.accuracy),
            report.total_questions.to_string(),
            report.correct_answers.to_string(),
        ]);
        let mut summary = summary.build();
        summary
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut misses = Builder::default();
        misses.push_record(["Question", "Expected", "Predicted"]);
        let mut miss_count = 0;
        for result in report.incorrect() {
            misses.push_record([
                truncate(&result.question, QUESTION_WIDTH),
                letter(result.correct_answer),
                letter(result.predicted_answer),
            ]);
            miss_count += 1;
        }

        if miss_count == 0 {
            return format!("{}\n{}", summary, self.success("All questions answered correctly"));
        }

        let mut misses = misses.build();
        misses
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        format!("{}\n{}", summary, misses)
    }

    /// Format a merge result.
    pub fn merge_summary(&self, result: &MergeResult, category: &str, output: &Path) -> String {
        let mut lines = vec![self.success(&format!(
            "Kept {} of {} question(s) in category '{}' from {} file(s)",
            result.questions.len(),
            result.total_questions,
            category,
            result.files_merged.len()
        ))];
        for skipped in &result.files_skipped {
            lines.push(self.warning(&format!("Skipped {}", skipped.display())));
        }
        if result.records_skipped > 0 {
            lines.push(self.warning(&format!(
                "Skipped {} unreadable question(s)",
                result.records_skipped
            )));
        }
        lines.push(self.info(&format!("Saved to {}", output.display())));
        lines.join("\n")
    }

    /// Format a categorization summary.
    pub fn categorize_summary(&self, summary: &CategorizeSummary, output: &Path) -> String {
        let mut message = format!("Categorized {} question(s)", summary.categorized);
        if summary.skipped > 0 {
            message.push_str(&format!(", {} already categorized", summary.skipped));
        }
        format!(
            "{}\n{}",
            self.success(&message),
            self.info(&format!("Saved to {}", output.display()))
        )
    }

    /// Format a written-file result.
    pub fn saved(&self, what: &str, count: usize, output: &Path) -> String {
        self.success(&format!("Saved {} {} to {}", count, what, output.display()))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn letter(choice: Option<Choice>) -> String {
    choice.map_or_else(|| "-".to_string(), |c| c.to_string())
}

/// Shorten to `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexqa_domain::{Category, EvaluationResult};
    use std::path::PathBuf;

    fn create_test_question(id: u32) -> QuestionRecord {
        let options = Choice::ALL
            .iter()
            .map(|c| (*c, format!("Opción {}", c)))
            .collect();
        let mut question = QuestionRecord::new(id, "¿Qué órgano aprueba los Presupuestos?", options);
        question.correct_answer = Some(Choice::B);
        question.category = Some(Category::Constitucional);
        question
    }

    fn create_test_report() -> EvaluationReport {
        let result = |correct, predicted| EvaluationResult {
            question: "¿Pregunta?".to_string(),
            correct_answer: Some(correct),
            predicted_answer: predicted,
            context_used: None,
            llm_response: "Respuesta: a".to_string(),
        };
        EvaluationReport::from_results(vec![
            result(Choice::A, Some(Choice::A)),
            result(Choice::B, Some(Choice::B)),
            result(Choice::C, Some(Choice::C)),
            result(Choice::D, None),
        ])
        .unwrap()
    }

    #[test]
    fn test_questions_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter
            .format_questions(&[create_test_question(4)])
            .unwrap();
        assert!(output.contains("\"question_id\": 4"));
        assert!(output.contains("\"correct_answer\": \"b\""));
    }

    #[test]
    fn test_questions_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter
            .format_questions(&[create_test_question(4), create_test_question(9)])
            .unwrap();
        assert_eq!(output, "4\n9");
    }

    #[test]
    fn test_questions_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_questions(&[create_test_question(4)])
            .unwrap();
        assert!(output.contains("Question"));
        assert!(output.contains("Category"));
        assert!(output.contains(Category::Constitucional.label()));
    }

    #[test]
    fn test_empty_questions() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_questions(&[]).unwrap();
        assert!(output.contains("No questions found"));
    }

    #[test]
    fn test_report_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&create_test_report()).unwrap();
        assert!(output.contains("75.00%"));
        assert!(output.contains("Expected"));
    }

    #[test]
    fn test_report_quiet_and_json() {
        let report = create_test_report();

        let quiet = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(quiet.format_report(&report).unwrap(), "75.00");

        let json = Formatter::new(OutputFormat::Json, false);
        let value: serde_json::Value =
            serde_json::from_str(&json.format_report(&report).unwrap()).unwrap();
        assert_eq!(value["total_questions"], 4);
        assert_eq!(value["correct_answers"], 3);
    }

    #[test]
    fn test_merge_summary_lists_skipped_files() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let result = MergeResult {
            questions: vec![create_test_question(1)],
            total_questions: 3,
            files_merged: vec![PathBuf::from("a/categorized_questions.json")],
            files_skipped: vec![PathBuf::from("b/categorized_questions.json")],
            records_skipped: 1,
        };
        let output = formatter.merge_summary(&result, "penal", Path::new("out.json"));
        assert!(output.contains("Kept 1 of 3"));
        assert!(output.contains("⚠ Skipped b/categorized_questions.json"));
        assert!(output.contains("⚠ Skipped 1 unreadable question(s)"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("test"), "⚠ test");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("corto", 10), "corto");
        assert_eq!(truncate("áéíóúáéíóú", 5), "áéíó…");
    }
}
