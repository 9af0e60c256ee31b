//! Chunk module - bounded slices of a source document

/// A contiguous slice of a source document
///
/// `start` and `end` are byte offsets into the source, so
/// `&source[chunk.start..chunk.end] == chunk.text`. Chunks produced from one
/// source are contiguous, non-overlapping and in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Position of this chunk in its source (0-based)
    pub index: usize,

    /// Byte offset of the first character
    pub start: usize,

    /// Byte offset one past the last character
    pub end: usize,

    /// The chunk text
    pub text: String,
}

impl TextChunk {
    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths() {
        let chunk = TextChunk {
            index: 0,
            start: 4,
            end: 10,
            text: "héllo".to_string(),
        };
        assert_eq!(chunk.char_len(), 5);
        assert_eq!(chunk.end - chunk.start, chunk.text.len());
    }
}
