//! Dictionary indexing.
//!
//! Streams candidate words into a [`GramIndexWriter`] layered on the
//! current snapshot. Words are taken in sequence order; a word is skipped
//! when it is shorter than the minimum token length, contains control
//! characters, does not fit the word store, or is already present (earlier
//! in the same build or in the snapshot being extended).

use core::fmt;

use crate::analyzer::gram::is_indexable;
use crate::arena::WordArena;
use crate::index::{GramIndex, GramIndexWriter};
use gramspell_types::{Result, SuggestError, SuggesterConfig};
use rustc_hash::FxHashSet;
use tracing::{info, trace, warn};

/// Outcome of one dictionary build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexReport {
    /// Words that became new entries.
    pub accepted: usize,
    /// Words shorter than the minimum token length.
    pub skipped_short: usize,
    /// Words already present in this build or in the base snapshot.
    pub skipped_duplicate: usize,
    /// Words with control characters or too long for the word store.
    pub skipped_invalid: usize,
    /// Generation of the snapshot produced by the build.
    pub generation: u64,
}

impl IndexReport {
    /// Total words read from the source.
    pub fn seen(&self) -> usize {
        self.accepted + self.skipped_short + self.skipped_duplicate + self.skipped_invalid
    }
}

impl fmt::Display for IndexReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "accepted {} of {} words (short {}, duplicate {}, invalid {}), generation {}",
            self.accepted,
            self.seen(),
            self.skipped_short,
            self.skipped_duplicate,
            self.skipped_invalid,
            self.generation
        )
    }
}

/// Builds new snapshots from word sequences.
#[derive(Debug, Clone, Copy)]
pub struct DictionaryIndexer {
    min_token_length: usize,
}

impl Default for DictionaryIndexer {
    fn default() -> Self {
        Self::new(SuggesterConfig::default().min_token_length)
    }
}

impl DictionaryIndexer {
    /// Creates an indexer. `min_token_length` below 2 is raised to 2.
    pub fn new(min_token_length: usize) -> Self {
        Self {
            min_token_length: min_token_length.max(SuggesterConfig::MIN_TOKEN_LENGTH_FLOOR),
        }
    }

    #[inline(always)]
    pub fn min_token_length(&self) -> usize {
        self.min_token_length
    }

    /// Indexes `words` on top of `base` and returns the new snapshot.
    ///
    /// `base` is only read; publishing the result is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestError::IndexUnavailable`] if the word store runs out
    /// of entry ids.
    pub fn build<I>(&self, base: &GramIndex, words: I) -> Result<(GramIndex, IndexReport)>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.try_build(base, words.into_iter().map(Ok::<_, SuggestError>))
    }

    /// Like [`build`](Self::build) for sources that can fail mid-stream.
    ///
    /// The first source error aborts the build; nothing staged so far is
    /// kept and `base` is unaffected.
    pub fn try_build<I, S, E>(&self, base: &GramIndex, words: I) -> Result<(GramIndex, IndexReport)>
    where
        I: IntoIterator<Item = std::result::Result<S, E>>,
        S: AsRef<str>,
        E: Into<SuggestError>,
    {
        let mut writer = GramIndexWriter::new(base);
        let mut accepted: FxHashSet<String> = FxHashSet::default();
        let mut report = IndexReport::default();

        for item in words {
            let item = item.map_err(Into::<SuggestError>::into)?;
            let word = item.as_ref();

            if word.chars().count() < self.min_token_length {
                report.skipped_short += 1;
                continue;
            }
            if !is_indexable(word) {
                trace!(word, "skipping word with control characters");
                report.skipped_invalid += 1;
                continue;
            }
            if word.len() > WordArena::MAX_WORD_BYTES {
                warn!(
                    len = word.len(),
                    max = WordArena::MAX_WORD_BYTES,
                    "skipping word too long for the word store"
                );
                report.skipped_invalid += 1;
                continue;
            }
            if accepted.contains(word) || base.contains(word) {
                report.skipped_duplicate += 1;
                continue;
            }

            writer.add_word(word)?;
            accepted.insert(word.to_owned());
            report.accepted += 1;
        }

        let index = writer.commit();
        report.generation = index.generation();

        info!(
            accepted = report.accepted,
            skipped_short = report.skipped_short,
            skipped_duplicate = report.skipped_duplicate,
            skipped_invalid = report.skipped_invalid,
            words = index.len(),
            generation = report.generation,
            "dictionary indexed"
        );

        Ok((index, report))
    }
}
