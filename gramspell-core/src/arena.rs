//! Bump storage for dictionary words
//!
//! Every accepted word is appended to one contiguous buffer and referenced
//! by an `(offset, length)` span. The span index is the word's entry id.
//!
//! ## Memory Layout
//!
//! ```text
//! Arena Buffer: [hello][hallo][hullo][world]...[free space]
//!               ^      ^      ^      ^
//!               |      |      |      |
//! Spans:       (0,5)  (5,5)  (10,5) (15,5) ...
//! ```
//!
//! - Append: O(1) amortized
//! - Lookup: O(1), a slice of the buffer
//! - Overhead: 6 bytes per word (u32 offset + u16 len)
//!
//! A snapshot owns its arena. Rebuilds clone the previous arena and append
//! to the clone, so the published snapshot is never written to.

use gramspell_types::EntryId;

/// Word reference - 6 bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordSpan {
    offset: u32,
    len: u16,
}

impl WordSpan {
    #[inline(always)]
    pub const fn new(offset: u32, len: u16) -> Self {
        Self { offset, len }
    }

    /// Byte offset in the arena.
    #[inline(always)]
    pub const fn offset(self) -> usize {
        self.offset as usize
    }

    /// Byte length.
    #[inline(always)]
    pub const fn len(self) -> usize {
        self.len as usize
    }
}

/// Append-only word store.
#[derive(Clone, Debug, Default)]
pub struct WordArena {
    buffer: String,
    spans: Vec<WordSpan>,
}

impl WordArena {
    /// Longest word the arena accepts, in bytes.
    pub const MAX_WORD_BYTES: usize = u16::MAX as usize;

    pub fn new() -> Self {
        Self::with_capacity(16 * 1024, 1024)
    }

    pub fn with_capacity(buffer_cap: usize, word_cap: usize) -> Self {
        Self {
            buffer: String::with_capacity(buffer_cap),
            spans: Vec::with_capacity(word_cap),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Bytes of word text held.
    #[inline(always)]
    pub fn text_bytes(&self) -> usize {
        self.buffer.len()
    }

    /// Appends a word and returns its id.
    ///
    /// Returns `None` if the word is longer than [`Self::MAX_WORD_BYTES`] or
    /// the id or offset space is exhausted.
    pub fn push(&mut self, word: &str) -> Option<EntryId> {
        if word.len() > Self::MAX_WORD_BYTES {
            return None;
        }
        let id = EntryId::try_from(self.spans.len()).ok()?;
        let offset = u32::try_from(self.buffer.len()).ok()?;
        offset.checked_add(word.len() as u32)?;

        self.buffer.push_str(word);
        self.spans.push(WordSpan::new(offset, word.len() as u16));
        Some(id)
    }

    /// Returns the word stored under `id`.
    #[inline(always)]
    pub fn get(&self, id: EntryId) -> Option<&str> {
        let span = self.spans.get(id as usize)?;
        self.buffer.get(span.offset()..span.offset() + span.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_push_get() {
        let mut arena = WordArena::new();

        let id0 = arena.push("hello").expect("should push");
        let id1 = arena.push("world").expect("should push");
        let id2 = arena.push("grüße").expect("should push");

        assert_eq!(id0, 0);
        assert_eq!(id1, 1);
        assert_eq!(id2, 2);

        assert_eq!(arena.get(id0), Some("hello"));
        assert_eq!(arena.get(id1), Some("world"));
        assert_eq!(arena.get(id2), Some("grüße"));
        assert_eq!(arena.get(3), None);
    }

    #[test]
    fn word_too_long() {
        let mut arena = WordArena::new();
        let word = "x".repeat(WordArena::MAX_WORD_BYTES + 1);
        assert!(arena.push(&word).is_none());
        assert!(arena.is_empty());

        let exact = "x".repeat(WordArena::MAX_WORD_BYTES);
        assert!(arena.push(&exact).is_some());
    }

    #[test]
    fn clone_is_independent() {
        let mut base = WordArena::new();
        base.push("alpha").expect("should push");

        let mut next = base.clone();
        next.push("beta").expect("should push");

        assert_eq!(base.len(), 1);
        assert_eq!(next.len(), 2);
        assert_eq!(base.get(1), None);
        assert_eq!(next.get(1), Some("beta"));
    }

    #[test]
    fn ids_follow_push_order() {
        let mut arena = WordArena::with_capacity(64, 4);
        for w in ["one", "two", "three"] {
            arena.push(w).expect("should push");
        }
        let collected: Vec<&str> = (0..3).filter_map(|id| arena.get(id)).collect();
        assert_eq!(collected, vec!["one", "two", "three"]);
        assert_eq!(arena.text_bytes(), 11);
    }
}
