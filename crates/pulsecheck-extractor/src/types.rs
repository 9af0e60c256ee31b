//! Request types for extraction

/// One per-chunk oracle request
///
/// Ephemeral: built by the prompt builder, sent, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    /// Index of the chunk within its source
    pub chunk_index: usize,

    /// Label of the data source
    pub source_label: String,

    /// System instruction
    pub instruction: String,

    /// Chunk text, sent as the user message
    pub chunk_text: String,
}
