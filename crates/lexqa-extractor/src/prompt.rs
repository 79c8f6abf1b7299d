//! LLM prompt for question extraction

/// Builds the extraction prompt for one chunk
pub struct PromptBuilder {
    text: String,
}

impl PromptBuilder {
    /// Create a new prompt builder for a chunk of exam text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(EXTRACTION_INSTRUCTIONS.len() + self.text.len() + 1);
        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push('\n');
        prompt.push_str(&self.text);
        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str = "Please format the following text into a structured format where each question has:
1. A question_id (number)
2. The question text
3. The choices (a, b, c, d)

Only include the formatted question and choices if the text contains all the information.

Format should be:
question_id
question
choices

question_id
question
choices

Here's the text to format:";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_ends_with_chunk_text() {
        let prompt = PromptBuilder::new("12\n¿Qué es?\na) x").build();
        assert!(prompt.ends_with("Here's the text to format:\n12\n¿Qué es?\na) x"));
    }

    #[test]
    fn test_prompt_describes_record_layout() {
        let prompt = PromptBuilder::new("").build();
        assert!(prompt.contains("1. A question_id (number)"));
        assert!(prompt.contains("3. The choices (a, b, c, d)"));
        assert!(prompt.contains("question_id\nquestion\nchoices\n\nquestion_id"));
    }
}
