//! Sentence-boundary text chunking for large documents
//!
//! Sizes are counted in characters, never bytes, so a cut can not land inside
//! a multi-byte code point. Concatenating the produced chunks in order gives
//! back the input exactly.

use pulsecheck_domain::TextChunk;

/// Characters that end a sentence
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Splits text into bounded chunks at sentence boundaries
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    max_chunk_size: usize,
}

impl TextChunker {
    /// Create a new text chunker
    pub fn new(max_chunk_size: usize) -> Self {
        Self { max_chunk_size }
    }

    /// Maximum chunk size in characters
    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    /// Chunk the given text
    pub fn chunk(&self, text: &str) -> Vec<TextChunk> {
        chunk_text(text, self.max_chunk_size)
    }
}

/// Split `text` into chunks of at most `max_size` characters
///
/// From the current offset the tentative end is `offset + max_size` (capped
/// at the end of the text). Unless that already reaches the end, the cut moves
/// back to just after the last `.`, `!` or `?` that is followed by whitespace
/// inside the window, consuming the terminator and that one whitespace
/// character. With no such boundary the cut stays at the tentative end, even
/// mid-word.
///
/// Empty text yields no chunks. A `max_size` of 0 is treated as 1.
pub fn chunk_text(text: &str, max_size: usize) -> Vec<TextChunk> {
    let max_size = max_size.max(1);
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let char_count = chars.len();
    let byte_at = |pos: usize| chars.get(pos).map_or(text.len(), |&(offset, _)| offset);

    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < char_count {
        let tentative_end = usize::min(pos + max_size, char_count);
        let cut = if tentative_end < char_count {
            last_sentence_cut(&chars[pos..tentative_end]).map_or(tentative_end, |rel| pos + rel)
        } else {
            tentative_end
        };

        let (start, end) = (byte_at(pos), byte_at(cut));
        chunks.push(TextChunk {
            index: chunks.len(),
            start,
            end,
            text: text[start..end].to_string(),
        });
        pos = cut;
    }

    chunks
}

/// Relative cut position after the last terminator-plus-whitespace in `window`
fn last_sentence_cut(window: &[(usize, char)]) -> Option<usize> {
    window
        .windows(2)
        .rposition(|pair| SENTENCE_TERMINATORS.contains(&pair[0].1) && pair[1].1.is_whitespace())
        .map(|idx| idx + 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunks: &[TextChunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_empty_text() {
        assert!(chunk_text("", 100).is_empty());
    }

    #[test]
    fn test_small_text_is_one_chunk() {
        let chunks = chunk_text("Short text here.", 100);
        assert_eq!(texts(&chunks), vec!["Short text here."]);
        assert_eq!((chunks[0].start, chunks[0].end), (0, 16));
    }

    #[test]
    fn test_cuts_after_last_sentence_boundary() {
        let chunks = chunk_text("One. Two. Three.", 10);
        assert_eq!(texts(&chunks), vec!["One. Two. ", "Three."]);
    }

    #[test]
    fn test_all_terminators_recognized() {
        let chunks = chunk_text("Why? Because! Done. tail", 14);
        assert_eq!(texts(&chunks)[0], "Why? Because! ");

        let chunks = chunk_text("Wait! what now", 8);
        assert_eq!(texts(&chunks)[0], "Wait! ");
    }

    #[test]
    fn test_terminator_without_whitespace_is_not_a_boundary() {
        // "3.5" and "e.g.x" must not split
        let chunks = chunk_text("v3.5 e.g.x abcdef", 8);
        assert_eq!(texts(&chunks), vec!["v3.5 e.g", ".x abcde", "f"]);
    }

    #[test]
    fn test_whitespace_must_fall_inside_window() {
        // The '.' is the last char of the window; its space is outside
        let chunks = chunk_text("Hi there. Bye", 9);
        assert_eq!(texts(&chunks), vec!["Hi there.", " Bye"]);
    }

    #[test]
    fn test_hard_cut_without_boundary() {
        let text = "a".repeat(25);
        let chunks = chunk_text(&text, 10);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text.len(), 10);
        assert_eq!(chunks[2].text.len(), 5);
    }

    #[test]
    fn test_newline_counts_as_whitespace() {
        let chunks = chunk_text("Closed PROJ-1.\nOpened PROJ-2.", 20);
        assert_eq!(texts(&chunks)[0], "Closed PROJ-1.\n");
    }

    #[test]
    fn test_multibyte_text_never_split_inside_a_char() {
        let text = "Équipe prête. Tâches ouvertes: 12. Fini! ✓✓✓✓✓✓";
        let chunks = chunk_text(text, 7);
        let rebuilt: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rebuilt, text);
        for chunk in &chunks {
            assert!(chunk.char_len() <= 7);
            assert_eq!(&text[chunk.start..chunk.end], chunk.text);
        }
    }

    #[test]
    fn test_indices_are_sequential() {
        let chunks = chunk_text(&"word ".repeat(40), 16);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn test_zero_max_size_still_terminates() {
        let chunks = chunk_text("abc", 0);
        assert_eq!(texts(&chunks), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_chunker_wrapper() {
        let chunker = TextChunker::new(10);
        assert_eq!(chunker.max_chunk_size(), 10);
        assert_eq!(chunker.chunk("One. Two. Three.").len(), 2);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_chunks_reconstruct_input(text in "\\PC{0,300}", max in 1usize..60) {
            let chunks = chunk_text(&text, max);
            let rebuilt: String = chunks.iter().map(|c| c.text.as_str()).collect();
            prop_assert_eq!(rebuilt, text);
        }

        #[test]
        fn test_chunks_respect_bound(text in "[a-z .!?\\n]{0,400}", max in 1usize..40) {
            for chunk in chunk_text(&text, max) {
                prop_assert!(chunk.char_len() <= max);
                prop_assert!(!chunk.text.is_empty());
            }
        }

        #[test]
        fn test_chunks_are_contiguous(text in "\\PC{0,200}", max in 1usize..30) {
            let chunks = chunk_text(&text, max);
            let mut expected_start = 0;
            for chunk in &chunks {
                prop_assert_eq!(chunk.start, expected_start);
                expected_start = chunk.end;
            }
            prop_assert_eq!(expected_start, text.len());
        }
    }
}
