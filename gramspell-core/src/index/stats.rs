//! Statistics and IndexStats.

use crate::index::types::{GramIndex, Posting, PostingBlock};
use gramspell_types::{EntryId, GramRole};

/// A snapshot of index statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of word entries.
    pub num_words: usize,
    /// Number of distinct (field, gram) terms.
    pub num_terms: usize,
    /// Terms in `gram<ng>` fields.
    pub gram_terms: usize,
    /// Terms in `start<ng>` fields.
    pub start_terms: usize,
    /// Terms in `end<ng>` fields.
    pub end_terms: usize,
    /// Total number of postings.
    pub total_postings: usize,
    /// Bytes of stored word text.
    pub word_bytes: usize,
    /// Build generation.
    pub generation: u64,
}

impl GramIndex {
    /// Returns index statistics.
    pub fn stats(&self) -> IndexStats {
        let mut gram_terms = 0;
        let mut start_terms = 0;
        let mut end_terms = 0;
        for block in &self.blocks {
            match block.term.field().role {
                GramRole::Gram => gram_terms += 1,
                GramRole::Start => start_terms += 1,
                GramRole::End => end_terms += 1,
            }
        }

        IndexStats {
            num_words: self.words.len(),
            num_terms: self.blocks.len(),
            gram_terms,
            start_terms,
            end_terms,
            total_postings: self.postings.len(),
            word_bytes: self.words.text_bytes(),
            generation: self.generation,
        }
    }
}

impl IndexStats {
    /// Returns approximate memory usage in bytes.
    pub fn memory_usage_bytes(&self) -> usize {
        let blocks_size = self.num_terms * std::mem::size_of::<PostingBlock>();
        let postings_size = self.total_postings * std::mem::size_of::<Posting>();
        // span (6 bytes, padded to 8) + lexicon slot
        let words_size =
            self.word_bytes + self.num_words * (8 + std::mem::size_of::<EntryId>());
        blocks_size + postings_size + words_size
    }
}

impl core::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} words, {} terms (gram {}, start {}, end {}), {} postings, generation {}",
            self.num_words,
            self.num_terms,
            self.gram_terms,
            self.start_terms,
            self.end_terms,
            self.total_postings,
            self.generation
        )
    }
}
