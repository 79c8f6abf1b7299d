//! Configuration for categorization and evaluation

use serde::{Deserialize, Serialize};

/// Evaluation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Completion budget per question
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Context passages retrieved per question
    pub top_k: usize,

    /// Corpus texts per embedding call, capped by the provider limit
    pub embed_batch_size: usize,
}

impl EvalConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if self.top_k == 0 {
            return Err("top_k must be greater than 0".to_string());
        }
        if self.embed_batch_size == 0 {
            return Err("embed_batch_size must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.0,
            top_k: 3,
            embed_batch_size: 96,
        }
    }
}

/// Categorization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorizerConfig {
    /// Completion budget per question
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

impl Default for CategorizerConfig {
    fn default() -> Self {
        Self {
            max_tokens: 50,
            temperature: 0.0,
        }
    }
}
