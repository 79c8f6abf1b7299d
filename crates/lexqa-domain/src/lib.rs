//! lexqa Domain Layer
//!
//! This crate holds the value types shared by every stage of the exam
//! question pipeline, plus the trait interfaces for the external provider
//! capabilities those stages depend on. It carries no I/O and no provider
//! code; infrastructure implementations live in other crates.
//!
//! ## Key Concepts
//!
//! - **QuestionRecord**: one multiple-choice exam question with four lettered
//!   options, an optional correct answer and an optional category
//! - **Choice**: an option letter, `a` through `d`
//! - **AnswerKey**: the id → letter mapping printed at the end of an exam
//! - **Category**: the closed legal-subdomain taxonomy, with `Otros` as the
//!   catch-all
//! - **EvaluationResult**: one scored model answer
//!
//! ## Architecture
//!
//! - Pure data and parsing of the data's own textual forms
//! - Serde derives for the persisted JSON formats
//! - Trait definitions for completion, embedding and rerank capabilities

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod answer_key;
pub mod category;
pub mod evaluation;
pub mod question;
pub mod traits;

// Re-exports for convenience
pub use answer_key::AnswerKey;
pub use category::Category;
pub use evaluation::EvaluationResult;
pub use question::{Choice, QuestionRecord};
