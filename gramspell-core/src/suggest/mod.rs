//! Suggestion engine.
//!
//! A [`Suggester`] owns the current [`GramIndex`] snapshot and turns a
//! query token into ranked suggestions:
//!
//! 1. retrieve up to `max * hit_enumerations_per_suggestion` candidates by
//!    gram overlap,
//! 2. drop the token itself unless asked to keep it,
//! 3. rescore each candidate by normalized edit distance and drop those
//!    under `min_score`,
//! 4. optionally gate on corpus frequency,
//! 5. keep the best `max` in a bounded queue.
//!
//! Queries read a snapshot without locking. Rebuilds run one at a time,
//! build a new snapshot next to the current one and publish it with a
//! single atomic swap.

mod distance;
mod options;
mod queue;

pub use distance::{similarity, DamerauLevenshtein, EditDistance, Levenshtein};
pub use options::{FrequencyFilter, SuggestOptions};
pub use queue::SuggestionQueue;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::analyzer::is_indexable;
use crate::index::{GramIndex, IndexStats};
use crate::indexer::{DictionaryIndexer, IndexReport};
use gramspell_types::{Result, SuggestError, Suggestion, SuggesterConfig};

/// Engine counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineMetrics {
    /// Words accepted across all builds since creation or the last clear.
    pub words_indexed: u64,
    /// Suggestion calls served since creation or the last clear.
    pub queries_executed: u64,
    /// Entries in the current snapshot.
    pub current_word_count: u64,
    /// Generation of the current snapshot.
    pub generation: u64,
}

/// "Did you mean" engine over a dictionary of words.
///
/// ```
/// use gramspell_core::Suggester;
///
/// let suggester = Suggester::new();
/// suggester.index_dictionary(["hello", "hallo", "hullo", "world"])?;
///
/// let words: Vec<String> = suggester
///     .suggest("helo", 5)?
///     .into_iter()
///     .map(|s| s.word)
///     .collect();
/// assert!(words.contains(&"hello".to_string()));
/// assert!(!words.contains(&"world".to_string()));
/// # Ok::<(), gramspell_core::SuggestError>(())
/// ```
pub struct Suggester<D = Levenshtein> {
    config: SuggesterConfig,
    metric: D,
    current: ArcSwap<GramIndex>,
    build_lock: Mutex<()>,
    words_indexed: AtomicU64,
    queries_executed: AtomicU64,
}

impl Default for Suggester<Levenshtein> {
    fn default() -> Self {
        Self::new()
    }
}

impl Suggester<Levenshtein> {
    /// Creates an empty engine with the default configuration.
    pub fn new() -> Self {
        Self::from_parts(SuggesterConfig::default(), Levenshtein)
    }

    /// Creates an empty engine with `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestError::InvalidConfig`] if `config` does not validate.
    pub fn with_config(config: SuggesterConfig) -> Result<Self> {
        Self::with_metric(config, Levenshtein)
    }
}

impl<D: EditDistance> Suggester<D> {
    /// Creates an empty engine rescoring candidates with `metric`.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestError::InvalidConfig`] if `config` does not validate.
    pub fn with_metric(config: SuggesterConfig, metric: D) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, metric))
    }

    fn from_parts(config: SuggesterConfig, metric: D) -> Self {
        Self {
            config,
            metric,
            current: ArcSwap::from_pointee(GramIndex::new()),
            build_lock: Mutex::new(()),
            words_indexed: AtomicU64::new(0),
            queries_executed: AtomicU64::new(0),
        }
    }

    #[inline(always)]
    pub fn config(&self) -> &SuggesterConfig {
        &self.config
    }

    /// The current snapshot. Holding it keeps it alive across rebuilds.
    pub fn snapshot(&self) -> Arc<GramIndex> {
        self.current.load_full()
    }

    /// Number of words in the current snapshot.
    pub fn len(&self) -> usize {
        self.current.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }

    /// Whether `word` is in the current snapshot.
    pub fn contains(&self, word: &str) -> bool {
        self.current.load().contains(word)
    }

    pub fn stats(&self) -> IndexStats {
        self.current.load().stats()
    }

    pub fn metrics(&self) -> EngineMetrics {
        let current = self.current.load();
        EngineMetrics {
            words_indexed: self.words_indexed.load(Ordering::Relaxed),
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            current_word_count: current.len() as u64,
            generation: current.generation(),
        }
    }

    /// Adds `words` to the dictionary, skipping words shorter than the
    /// configured minimum token length.
    ///
    /// Queries running during the build keep seeing the previous snapshot
    /// and switch to the new one once it is fully built.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestError::IndexUnavailable`] if the build fails; the
    /// current snapshot is left as it was.
    pub fn index_dictionary<I>(&self, words: I) -> Result<IndexReport>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.index_dictionary_with(words, self.config.effective_min_token_length())
    }

    /// Like [`index_dictionary`](Self::index_dictionary) with an explicit
    /// minimum token length. Values below 2 are raised to 2.
    pub fn index_dictionary_with<I>(&self, words: I, min_token_length: usize) -> Result<IndexReport>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let indexer = DictionaryIndexer::new(min_token_length);
        self.rebuild(|base| indexer.build(base, words))
    }

    /// Indexes a fallible word source such as
    /// [`stream_words`](crate::dictionary::stream_words).
    ///
    /// The first source error aborts the build and is returned.
    pub fn try_index_dictionary<I, S, E>(&self, words: I) -> Result<IndexReport>
    where
        I: IntoIterator<Item = std::result::Result<S, E>>,
        S: AsRef<str>,
        E: Into<SuggestError>,
    {
        let indexer = DictionaryIndexer::new(self.config.effective_min_token_length());
        self.rebuild(|base| indexer.try_build(base, words))
    }

    fn rebuild<F>(&self, build: F) -> Result<IndexReport>
    where
        F: FnOnce(&GramIndex) -> Result<(GramIndex, IndexReport)>,
    {
        let _guard = self.build_lock.lock();
        let base = self.current.load_full();
        let (next, report) = build(&base)?;
        self.current.store(Arc::new(next));
        self.words_indexed
            .fetch_add(report.accepted as u64, Ordering::Relaxed);
        Ok(report)
    }

    /// Drops every word and resets the counters.
    ///
    /// The empty snapshot continues the generation sequence.
    pub fn clear(&self) {
        let _guard = self.build_lock.lock();
        let generation = self.current.load().generation() + 1;
        self.current.store(Arc::new(GramIndex::at_generation(generation)));
        self.words_indexed.store(0, Ordering::Relaxed);
        self.queries_executed.store(0, Ordering::Relaxed);
        debug!(generation, "dictionary cleared");
    }

    /// Suggests up to `max` words for `token` using the configured options.
    pub fn suggest(&self, token: &str, max: usize) -> Result<Vec<Suggestion>> {
        self.suggest_with(token, max, &SuggestOptions::from_config(&self.config))
    }

    /// Suggests up to `max` words for `token`, best first.
    ///
    /// With a frequency source and `only_more_popular` off, a token the
    /// corpus already contains is returned alone and unscored. Otherwise
    /// every suggestion carries its similarity score, and its corpus
    /// frequency when a source is given.
    ///
    /// Empty tokens and tokens with control characters yield no
    /// suggestions.
    ///
    /// # Errors
    ///
    /// Propagates frequency source failures, and
    /// [`SuggestError::NotFound`] if a retrieved entry cannot be resolved.
    pub fn suggest_with(
        &self,
        token: &str,
        max: usize,
        options: &SuggestOptions<'_>,
    ) -> Result<Vec<Suggestion>> {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);

        if max == 0 || token.is_empty() || !is_indexable(token) {
            return Ok(Vec::new());
        }

        let mut goal_frequency = 0;
        if let Some(filter) = options.frequency {
            let frequency = filter.source.frequency_of(filter.field, token)?;
            if !options.only_more_popular && frequency > 0 {
                trace!(token, frequency, "token present in corpus");
                return Ok(vec![Suggestion {
                    word: token.to_owned(),
                    score: None,
                    frequency: Some(frequency),
                }]);
            }
            if options.only_more_popular {
                goal_frequency = frequency;
            }
        }

        let snapshot = self.current.load();
        let max_candidates = max.saturating_mul(options.hit_enumerations_per_suggestion.max(1));
        let hits = snapshot.retrieve(
            token,
            max_candidates,
            self.config.start_boost,
            self.config.end_boost,
        );

        let mut queue = SuggestionQueue::new(max);
        for hit in &hits {
            let word = snapshot.word_of(hit.entry)?;
            if !options.suggest_self && word == token {
                continue;
            }

            let score = similarity(&self.metric, word, token);
            if score < self.config.min_score {
                trace!(word, score, "below minimum score");
                continue;
            }
            // Equal scores lose to earlier candidates, so skip the lookup
            if queue.threshold().is_some_and(|worst| score <= worst) {
                continue;
            }

            let mut frequency = None;
            if let Some(filter) = options.frequency {
                let count = filter.source.frequency_of(filter.field, word)?;
                if count < 1 || goal_frequency > count {
                    trace!(word, count, goal_frequency, "filtered by frequency");
                    continue;
                }
                frequency = Some(count);
            }

            queue.push(Suggestion {
                word: word.to_owned(),
                score: Some(score),
                frequency,
            });
        }

        let suggestions = queue.into_sorted_vec();
        debug!(
            token,
            candidates = hits.len(),
            suggestions = suggestions.len(),
            generation = snapshot.generation(),
            "suggest"
        );
        Ok(suggestions)
    }
}
