//! Snapshot building.
//!
//! A [`GramIndexWriter`] stages new words on top of a base snapshot and
//! commits them into a fresh [`GramIndex`]. The base is only read, so it
//! stays fully queryable while the writer runs.

use crate::analyzer::gram::{extract_grams, GramWindow};
use crate::arena::WordArena;
use crate::index::types::{GramIndex, Posting, PostingBlock, TempGramEntry};
use gramspell_types::{EntryId, FieldKey, Result, SuggestError, Term};

/// Stages words for the next snapshot.
pub struct GramIndexWriter<'a> {
    base: &'a GramIndex,
    words: WordArena,
    first_new: EntryId,
    temp: Vec<TempGramEntry>,
}

impl<'a> GramIndexWriter<'a> {
    /// Starts a writer whose output will contain everything in `base`.
    pub fn new(base: &'a GramIndex) -> Self {
        Self {
            base,
            words: base.words.clone(),
            first_new: base.words.len() as EntryId,
            temp: Vec::new(),
        }
    }

    /// Stores `word` as a new entry and emits its gram postings.
    ///
    /// For every gram length in the word's window this emits one `gram<ng>`
    /// posting per gram occurrence, one `start<ng>` posting for the first
    /// gram and one `end<ng>` posting for the last gram.
    ///
    /// The caller is responsible for not adding a word twice.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestError::IndexUnavailable`] when the word store cannot
    /// take the word (too long, or id space exhausted).
    pub fn add_word(&mut self, word: &str) -> Result<EntryId> {
        let entry = self.words.push(word).ok_or_else(|| {
            SuggestError::IndexUnavailable(format!(
                "word store rejected a {}-byte word at entry {}",
                word.len(),
                self.words.len()
            ))
        })?;

        let temp = &mut self.temp;
        for ng in GramWindow::for_word(word).range() {
            let key = ng as u8;
            let mut first: Option<&str> = None;
            let mut last: Option<&str> = None;

            extract_grams(word, ng, |gram| {
                first.get_or_insert(gram);
                last = Some(gram);
                temp.push(TempGramEntry {
                    term: Term::new(FieldKey::gram(key), gram),
                    entry,
                });
            });

            // A word shorter than ng yields no grams and no start/end postings
            if let Some(gram) = first {
                temp.push(TempGramEntry {
                    term: Term::new(FieldKey::start(key), gram),
                    entry,
                });
            }
            if let Some(gram) = last {
                temp.push(TempGramEntry {
                    term: Term::new(FieldKey::end(key), gram),
                    entry,
                });
            }
        }

        Ok(entry)
    }

    /// Builds the next snapshot.
    ///
    /// ## Cold-start fast path
    ///
    /// When the base has no postings the blocks are built straight from the
    /// sorted staging buffer in one pass.
    ///
    /// ## Incremental path
    ///
    /// Otherwise the staged entries are turned into delta blocks and merged
    /// with the base blocks in O(N + Δ). New entry ids are all greater than
    /// base ids, so merged posting lists stay sorted.
    pub fn commit(mut self) -> GramIndex {
        GramIndex::sort_terms(&mut self.temp);

        let (blocks, postings) = if self.base.blocks.is_empty() {
            GramIndex::build_blocks_from_sorted(&self.temp)
        } else {
            let (delta_blocks, delta_postings) = GramIndex::build_blocks_from_sorted(&self.temp);
            GramIndex::merge_indexes(
                &self.base.blocks,
                &self.base.postings,
                &delta_blocks,
                &delta_postings,
            )
        };

        let lexicon = Self::merge_lexicon(&self.base.lexicon, &self.words, self.first_new);

        GramIndex {
            blocks,
            postings,
            words: self.words,
            lexicon,
            generation: self.base.generation + 1,
        }
    }

    fn merge_lexicon(base: &[EntryId], words: &WordArena, first_new: EntryId) -> Vec<EntryId> {
        let word = |id: EntryId| words.get(id).unwrap_or_default();

        let mut fresh: Vec<EntryId> = (first_new..words.len() as EntryId).collect();
        fresh.sort_unstable_by(|&a, &b| word(a).cmp(word(b)));

        let mut out = Vec::with_capacity(base.len() + fresh.len());
        let (mut ai, mut bi) = (0usize, 0usize);
        while ai < base.len() && bi < fresh.len() {
            if word(base[ai]) <= word(fresh[bi]) {
                out.push(base[ai]);
                ai += 1;
            } else {
                out.push(fresh[bi]);
                bi += 1;
            }
        }
        out.extend_from_slice(&base[ai..]);
        out.extend_from_slice(&fresh[bi..]);
        out
    }
}

impl GramIndex {
    pub(crate) fn sort_terms(entries: &mut [TempGramEntry]) {
        entries.sort_unstable_by(|a, b| a.term.cmp(&b.term).then_with(|| a.entry.cmp(&b.entry)));
    }

    /// Groups sorted entries into blocks, folding repeats of the same
    /// (term, entry) pair into one posting with an occurrence count.
    pub(crate) fn build_blocks_from_sorted(
        entries: &[TempGramEntry],
    ) -> (Vec<PostingBlock>, Vec<Posting>) {
        if entries.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let mut blocks: Vec<PostingBlock> = Vec::new();
        let mut postings: Vec<Posting> = Vec::with_capacity(entries.len());

        let mut current_term = entries[0].term;
        let mut current_offset = 0u32;
        let mut current_len = 0u32;
        let mut last_entry: Option<EntryId> = None;

        for item in entries {
            if item.term != current_term {
                blocks.push(PostingBlock {
                    term: current_term,
                    offset: current_offset,
                    len: current_len,
                });
                current_offset += current_len;
                current_term = item.term;
                current_len = 0;
                last_entry = None;
            }

            if last_entry == Some(item.entry) {
                if let Some(posting) = postings.last_mut() {
                    posting.occurrences = posting.occurrences.saturating_add(1);
                }
            } else {
                postings.push(Posting {
                    entry: item.entry,
                    occurrences: 1,
                });
                current_len += 1;
                last_entry = Some(item.entry);
            }
        }

        blocks.push(PostingBlock {
            term: current_term,
            offset: current_offset,
            len: current_len,
        });

        (blocks, postings)
    }

    pub(crate) fn merge_indexes(
        a_blocks: &[PostingBlock],
        a_postings: &[Posting],
        b_blocks: &[PostingBlock],
        b_postings: &[Posting],
    ) -> (Vec<PostingBlock>, Vec<Posting>) {
        let mut out_blocks: Vec<PostingBlock> = Vec::with_capacity(a_blocks.len() + b_blocks.len());
        let mut out_postings: Vec<Posting> = Vec::with_capacity(a_postings.len() + b_postings.len());

        let mut ai = 0usize;
        let mut bi = 0usize;

        while ai < a_blocks.len() && bi < b_blocks.len() {
            match a_blocks[ai].term.cmp(&b_blocks[bi].term) {
                std::cmp::Ordering::Less => {
                    Self::copy_block(&a_blocks[ai], a_postings, &mut out_blocks, &mut out_postings);
                    ai += 1;
                }
                std::cmp::Ordering::Greater => {
                    Self::copy_block(&b_blocks[bi], b_postings, &mut out_blocks, &mut out_postings);
                    bi += 1;
                }
                std::cmp::Ordering::Equal => {
                    let a_list = Self::block_postings(&a_blocks[ai], a_postings);
                    let b_list = Self::block_postings(&b_blocks[bi], b_postings);
                    let merged_offset = out_postings.len() as u32;
                    Self::merge_sorted(a_list, b_list, &mut out_postings);
                    out_blocks.push(PostingBlock {
                        term: a_blocks[ai].term,
                        offset: merged_offset,
                        len: out_postings.len() as u32 - merged_offset,
                    });
                    ai += 1;
                    bi += 1;
                }
            }
        }

        for block in &a_blocks[ai..] {
            Self::copy_block(block, a_postings, &mut out_blocks, &mut out_postings);
        }
        for block in &b_blocks[bi..] {
            Self::copy_block(block, b_postings, &mut out_blocks, &mut out_postings);
        }

        (out_blocks, out_postings)
    }

    #[inline(always)]
    fn copy_block(
        block: &PostingBlock,
        source_postings: &[Posting],
        out_blocks: &mut Vec<PostingBlock>,
        out_postings: &mut Vec<Posting>,
    ) {
        let new_offset = out_postings.len() as u32;
        out_postings.extend_from_slice(Self::block_postings(block, source_postings));
        out_blocks.push(PostingBlock {
            term: block.term,
            offset: new_offset,
            len: block.len,
        });
    }

    /// Merges two entry-sorted posting lists; the same entry in both lists
    /// becomes one posting with the occurrences summed.
    pub(crate) fn merge_sorted(a: &[Posting], b: &[Posting], out: &mut Vec<Posting>) {
        let mut ai = 0usize;
        let mut bi = 0usize;

        while ai < a.len() && bi < b.len() {
            match a[ai].entry.cmp(&b[bi].entry) {
                std::cmp::Ordering::Less => {
                    out.push(a[ai]);
                    ai += 1;
                }
                std::cmp::Ordering::Greater => {
                    out.push(b[bi]);
                    bi += 1;
                }
                std::cmp::Ordering::Equal => {
                    out.push(Posting {
                        entry: a[ai].entry,
                        occurrences: a[ai].occurrences.saturating_add(b[bi].occurrences),
                    });
                    ai += 1;
                    bi += 1;
                }
            }
        }

        out.extend_from_slice(&a[ai..]);
        out.extend_from_slice(&b[bi..]);
    }
}
