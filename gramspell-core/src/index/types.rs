//! Index types and constants.

use crate::arena::WordArena;
use gramspell_types::{EntryId, Term};

/// Inline capacity for query clauses before spilling to the heap.
pub const INLINE_CLAUSES: usize = 32;

/// Contiguous run of postings for one term.
#[derive(Clone, Copy, Debug)]
pub struct PostingBlock {
    pub term: Term,
    pub offset: u32,
    pub len: u32,
}

/// One word entry under one term.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Posting {
    pub entry: EntryId,
    /// Times the gram occurs in the word in this role.
    pub occurrences: u16,
}

/// Per-query score accumulator, kept sorted by entry.
#[derive(Clone, Copy, Debug)]
pub struct Candidate {
    pub entry: EntryId,
    pub score: f32,
}

/// Unsorted (term, entry) pair emitted while a word is being indexed.
#[derive(Clone, Copy, Debug)]
pub struct TempGramEntry {
    pub term: Term,
    pub entry: EntryId,
}

/// Immutable gram postings snapshot.
///
/// Holds every word entry and, for each `(field, gram)` term, the sorted
/// list of entries carrying it. A snapshot is never modified after it is
/// built; rebuilds produce a new one from it.
#[derive(Debug, Default)]
pub struct GramIndex {
    /// Sorted by term.
    pub(crate) blocks: Vec<PostingBlock>,
    pub(crate) postings: Vec<Posting>,
    pub(crate) words: WordArena,
    /// Entry ids sorted by word.
    pub(crate) lexicon: Vec<EntryId>,
    pub(crate) generation: u64,
}

impl GramIndex {
    /// Creates an empty snapshot at generation 0.
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            postings: Vec::new(),
            words: WordArena::new(),
            lexicon: Vec::new(),
            generation: 0,
        }
    }

    /// Creates an empty snapshot that continues an existing generation
    /// sequence.
    pub(crate) fn at_generation(generation: u64) -> Self {
        Self {
            generation,
            ..Self::new()
        }
    }

    /// Number of word entries.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Build generation; each committed build increments it.
    #[inline(always)]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
