//! Prompt construction for per-chunk metric extraction

use crate::types::ExtractionRequest;
use pulsecheck_domain::TextChunk;

/// Builds the per-chunk oracle request for one data source
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    source_label: String,
}

impl PromptBuilder {
    /// Create a new prompt builder for a source
    pub fn new(source_label: impl Into<String>) -> Self {
        Self {
            source_label: source_label.into(),
        }
    }

    /// The system instruction sent with every chunk of this source
    pub fn system_instruction(&self) -> String {
        format!(
            "Extract key project health metrics from this {} data chunk. Focus on quantitative data.",
            self.source_label
        )
    }

    /// Build the request for one chunk
    pub fn build(&self, chunk: &TextChunk) -> ExtractionRequest {
        ExtractionRequest {
            chunk_index: chunk.index,
            source_label: self.source_label.clone(),
            instruction: self.system_instruction(),
            chunk_text: chunk.text.clone(),
        }
    }
}
