//! Read API over a snapshot.

use crate::index::types::{GramIndex, Posting, PostingBlock};
use gramspell_types::{EntryId, FieldKey, Result, SuggestError, Term};

impl GramIndex {
    /// Entries whose indexed grams include `value` under `field`.
    ///
    /// Ids are returned ascending, each once. Empty if nothing matches.
    pub fn lookup(&self, field: FieldKey, value: &str) -> Vec<EntryId> {
        self.postings(field, value)
            .iter()
            .map(|p| p.entry)
            .collect()
    }

    /// Raw postings for `value` under `field`, including occurrence counts.
    pub fn postings(&self, field: FieldKey, value: &str) -> &[Posting] {
        self.term_postings(Term::new(field, value))
    }

    #[inline]
    pub(crate) fn term_postings(&self, term: Term) -> &[Posting] {
        match self.find_block(term) {
            Some(idx) => Self::block_postings(&self.blocks[idx], &self.postings),
            None => &[],
        }
    }

    /// Resolves an entry id to its word.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestError::NotFound`] if `id` is not in this snapshot.
    #[inline]
    pub fn word_of(&self, id: EntryId) -> Result<&str> {
        self.words.get(id).ok_or(SuggestError::NotFound(id))
    }

    /// Whether `word` is already a word entry.
    pub fn contains(&self, word: &str) -> bool {
        self.lexicon
            .binary_search_by(|&id| self.words.get(id).unwrap_or_default().cmp(word))
            .is_ok()
    }

    #[inline(always)]
    pub(crate) fn find_block(&self, term: Term) -> Option<usize> {
        self.blocks.binary_search_by_key(&term, |b| b.term).ok()
    }

    #[inline(always)]
    pub(crate) fn block_postings<'a>(block: &PostingBlock, postings: &'a [Posting]) -> &'a [Posting] {
        let start = block.offset as usize;
        &postings[start..start + block.len as usize]
    }
}
