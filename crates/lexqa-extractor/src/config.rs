//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Configuration for the Extractor
///
/// Sizes are in characters. Every field has a default, so a TOML section
/// may set only the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Core size of each chunk
    pub chunk_size: usize,

    /// Context added on both sides of each chunk core
    pub window_size: usize,

    /// Completion budget per chunk
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be between 0.0 and 2.0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            chunk_size: 3000,
            window_size: 200,
            max_tokens: 10_000,
            temperature: 0.0,
        }
    }
}
