//! Text chunking for ingestion.
//!
//! Splits long passages into overlapping chunks before embedding.
//!
//! - **Character-based sizes**: predictable and language-agnostic. Sizes are
//!   counted in bytes but every cut lands on a UTF-8 character boundary, so
//!   Urdu or other multi-byte text is safe.
//! - **Word boundary splitting**: avoids cutting mid-word.
//! - **Overlapping windows**: keeps context across chunk edges.

/// Configuration for text chunking.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Maximum bytes per chunk.
    /// Default: 2000 (~500 tokens for most models).
    pub max_chars: usize,

    /// Bytes of overlap between consecutive chunks.
    pub overlap: usize,

    /// Minimum chunk size (avoids tiny trailing chunks).
    pub min_chunk_size: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chars: 2000,
            overlap: 200,
            min_chunk_size: 100,
        }
    }
}

impl ChunkConfig {
    /// Smaller windows for models with a 512 token limit (Cohere v3,
    /// mxbai-embed-large).
    #[must_use]
    pub fn for_short_context() -> Self {
        Self {
            max_chars: 1500,
            overlap: 150,
            min_chunk_size: 80,
        }
    }
}

/// A text chunk with its index.
#[derive(Debug, Clone)]
pub struct TextChunk {
    /// The chunk text.
    pub text: String,
    /// Zero-based index of this chunk.
    pub index: usize,
    /// Byte offset in the original (trimmed) text.
    pub start_offset: usize,
    /// Byte offset where this chunk ends.
    pub end_offset: usize,
}

/// Split text into overlapping chunks.
///
/// Uses word boundaries to avoid splitting mid-word.
///
/// ```rust,ignore
/// use askbook::ingest::chunking::{chunk_text, ChunkConfig};
///
/// let chunks = chunk_text("A short passage.", &ChunkConfig::default());
/// assert_eq!(chunks.len(), 1);
/// ```
#[must_use]
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Vec<TextChunk> {
    let text = text.trim();

    if text.is_empty() {
        return vec![];
    }

    if text.len() <= config.max_chars {
        return vec![TextChunk {
            text: text.to_string(),
            index: 0,
            start_offset: 0,
            end_offset: text.len(),
        }];
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut index = 0;

    while start < text.len() {
        let mut end = floor_char_boundary(text, (start + config.max_chars).min(text.len()));

        if end < text.len() {
            end = find_word_boundary(text, end, start + config.min_chunk_size);
        }

        // A single character wider than max_chars: take it whole.
        if end <= start {
            end = ceil_char_boundary(text, start + 1);
        }

        let chunk = text[start..end].trim();

        if !chunk.is_empty() && (chunk.len() >= config.min_chunk_size || end >= text.len()) {
            chunks.push(TextChunk {
                text: chunk.to_string(),
                index,
                start_offset: start,
                end_offset: end,
            });
            index += 1;
        }

        if end >= text.len() {
            break;
        }

        let next_start = floor_char_boundary(text, end.saturating_sub(config.overlap));
        start = if next_start <= start { end } else { next_start };
    }

    chunks
}

/// Search backward from `target` for whitespace or punctuation, not going
/// below `min_pos`. Returns the byte index just past the boundary character.
fn find_word_boundary(text: &str, target: usize, min_pos: usize) -> usize {
    let window_start = ceil_char_boundary(text, min_pos.min(target));

    text[window_start..target]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace() || matches!(c, '.' | '!' | '?' | ';' | ',' | '۔' | '،'))
        .map_or(target, |(i, c)| window_start + i + c.len_utf8())
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_chunk() {
        let config = ChunkConfig::default();
        let chunks = chunk_text("Hello world", &config);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Hello world");
        assert_eq!(chunks[0].index, 0);
    }

    #[test]
    fn test_empty_text() {
        assert!(chunk_text("", &ChunkConfig::default()).is_empty());
        assert!(chunk_text("   \n\t  ", &ChunkConfig::default()).is_empty());
    }

    #[test]
    fn test_multiple_chunks() {
        let config = ChunkConfig {
            max_chars: 50,
            overlap: 10,
            min_chunk_size: 10,
        };

        let text = "The quick brown fox jumps over the lazy dog. This is a test sentence that should be split into multiple chunks.";
        let chunks = chunk_text(text, &config);

        assert!(chunks.len() > 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert!(chunk.text.len() <= config.max_chars);
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn test_overlap() {
        let config = ChunkConfig {
            max_chars: 20,
            overlap: 5,
            min_chunk_size: 5,
        };

        let chunks = chunk_text("one two three four five six seven eight", &config);
        assert!(chunks.len() >= 2);
        assert!(chunks[0].end_offset > chunks[1].start_offset);
    }

    #[test]
    fn test_multibyte_text_does_not_panic() {
        let config = ChunkConfig {
            max_chars: 25,
            overlap: 7,
            min_chunk_size: 3,
        };
        let text = "روبوٹکس ایک دلچسپ مضمون ہے۔ یہ مشینوں اور ذہانت کا مطالعہ ہے۔";
        let chunks = chunk_text(text, &config);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(!chunk.text.is_empty());
            assert!(chunk.text.len() <= config.max_chars);
        }
    }

    #[test]
    fn test_text_without_boundaries_still_progresses() {
        let config = ChunkConfig {
            max_chars: 10,
            overlap: 3,
            min_chunk_size: 2,
        };
        let chunks = chunk_text(&"x".repeat(35), &config);
        assert!(chunks.len() >= 4);
        assert_eq!(chunks.last().unwrap().end_offset, 35);
    }
}
