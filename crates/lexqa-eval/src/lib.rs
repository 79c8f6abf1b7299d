//! lexqa Evaluation
//!
//! Categorizes questions by legal subdomain and measures how well a model
//! answers them, optionally with context retrieved from a legal corpus.
//!
//! # Components
//!
//! - [`Categorizer`]: one classification call per uncategorized question
//! - [`Evaluator`]: replays questions as multiple-choice prompts and scores
//!   the extracted letter
//! - [`Retriever`]: batched corpus embedding, dot-product top-k, rerank
//! - [`EvaluationReport`]: accuracy over a result set
//!
//! All provider calls are awaited one at a time, in question order. A
//! provider failure aborts the run; an unreadable answer or category does
//! not.
//!
//! # Example Usage
//!
//! ```no_run
//! use lexqa_eval::{EvalConfig, Evaluator};
//! use lexqa_llm::MockProvider;
//!
//! # async fn example(questions: Vec<lexqa_domain::QuestionRecord>) -> Result<(), lexqa_eval::EvalError> {
//! let evaluator = Evaluator::new(MockProvider::new("Respuesta: a"), EvalConfig::default())?;
//! let report = evaluator.evaluate_all(&questions).await?;
//! println!("Accuracy: {:.2}%", report.accuracy);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod categorizer;
mod config;
mod error;
mod evaluator;
mod prompt;
mod report;
mod response;
mod retrieval;

pub use categorizer::{CategorizeSummary, Categorizer};
pub use config::{CategorizerConfig, EvalConfig};
pub use error::EvalError;
pub use evaluator::Evaluator;
pub use prompt::{categorization_prompt, evaluation_prompt};
pub use report::EvaluationReport;
pub use response::parse_predicted_answer;
pub use retrieval::Retriever;
