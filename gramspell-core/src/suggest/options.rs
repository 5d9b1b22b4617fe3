//! Per-call suggestion options.

use core::fmt;

use gramspell_types::{FrequencySource, SuggesterConfig};

/// A frequency source paired with the field to read counts from.
#[derive(Clone, Copy)]
pub struct FrequencyFilter<'a> {
    pub source: &'a dyn FrequencySource,
    pub field: &'a str,
}

impl fmt::Debug for FrequencyFilter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrequencyFilter")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

/// Options for a single [`suggest_with`](crate::Suggester::suggest_with) call.
///
/// Start from [`SuggestOptions::from_config`] (or `default()`) and override
/// what the call needs:
///
/// ```
/// use gramspell_core::{SuggestOptions, TermFrequencies};
///
/// let mut corpus = TermFrequencies::new();
/// corpus.add_document("body", ["hello", "world"]);
///
/// let options = SuggestOptions::default()
///     .frequency(&corpus, "body")
///     .only_more_popular(true);
/// assert!(options.only_more_popular);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SuggestOptions<'a> {
    /// Whether the query token may be suggested for itself.
    pub suggest_self: bool,
    /// Corpus used to gate and annotate suggestions.
    pub frequency: Option<FrequencyFilter<'a>>,
    /// Only suggest words at least as frequent as the query token.
    /// Has no effect without a frequency source.
    pub only_more_popular: bool,
    /// Retrieval hits examined per requested suggestion.
    pub hit_enumerations_per_suggestion: usize,
}

impl Default for SuggestOptions<'_> {
    fn default() -> Self {
        Self::from_config(&SuggesterConfig::default())
    }
}

impl<'a> SuggestOptions<'a> {
    /// Options carrying the defaults of `config`, with no frequency source.
    pub fn from_config(config: &SuggesterConfig) -> Self {
        Self {
            suggest_self: config.suggest_self,
            frequency: None,
            only_more_popular: config.suggest_only_more_popular,
            hit_enumerations_per_suggestion: config.hit_enumerations_per_suggestion,
        }
    }

    pub fn suggest_self(mut self, suggest_self: bool) -> Self {
        self.suggest_self = suggest_self;
        self
    }

    /// Gates suggestions on `field` of `source`.
    pub fn frequency(mut self, source: &'a dyn FrequencySource, field: &'a str) -> Self {
        self.frequency = Some(FrequencyFilter { source, field });
        self
    }

    pub fn only_more_popular(mut self, only_more_popular: bool) -> Self {
        self.only_more_popular = only_more_popular;
        self
    }

    pub fn hit_enumerations_per_suggestion(mut self, hits: usize) -> Self {
        self.hit_enumerations_per_suggestion = hits;
        self
    }
}
