//! Overlapping text windows sized for a prompt budget
//!
//! The chunker walks the text with a cursor. Each step takes a core of
//! `chunk_size` characters and widens it by `window_size` characters on
//! both sides, so a question cut at a core boundary still appears whole in
//! at least one chunk. Cores tile the text exactly.

/// One window of the source text
///
/// Offsets count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// First character of the emitted window
    pub start_offset: usize,
    /// One past the last character of the emitted window
    pub end_offset: usize,
    /// First character of the core
    pub core_start: usize,
    /// One past the last character of the core
    pub core_end: usize,
    /// Window text
    pub text: String,
}

impl Chunk {
    /// Window length in characters
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    /// Check if the window is empty
    pub fn is_empty(&self) -> bool {
        self.start_offset == self.end_offset
    }
}

/// Splits text into overlapping [`Chunk`]s
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    chunk_size: usize,
    window_size: usize,
}

impl TextChunker {
    /// Create a new text chunker
    ///
    /// A `chunk_size` of zero is treated as one; configurations are
    /// validated before they get here.
    pub fn new(chunk_size: usize, window_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            window_size,
        }
    }

    /// Chunk the given text, in document order
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        // byte position of every char boundary, including the end
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let length = boundaries.len() - 1;

        let mut chunks = Vec::new();
        let mut cursor = 0;
        while cursor < length {
            let core_end = (cursor + self.chunk_size).min(length);
            let start = cursor.saturating_sub(self.window_size);
            let end = (core_end + self.window_size).min(length);

            chunks.push(Chunk {
                start_offset: start,
                end_offset: end,
                core_start: cursor,
                core_end,
                text: text[boundaries[start]..boundaries[end]].to_string(),
            });
            cursor = core_end;
        }
        chunks
    }
}
