//! N-gram "did you mean" spelling suggestions.
//!
//! Words from a dictionary are indexed by their character grams, plus the
//! grams they start and end with. A misspelled token is turned into a
//! weighted query over the same grams; the best matching words are
//! rescored by edit distance, optionally filtered by corpus frequency and
//! returned best first.
//!
//! ```
//! use gramspell_core::{SuggestOptions, Suggester, TermFrequencies};
//!
//! let suggester = Suggester::new();
//! let report = suggester.index_dictionary(["hello", "hallo", "hullo", "world"])?;
//! assert_eq!(report.accepted, 4);
//!
//! let mut corpus = TermFrequencies::new();
//! corpus.add_document("body", ["hello", "world"]);
//!
//! let options = SuggestOptions::default()
//!     .frequency(&corpus, "body")
//!     .only_more_popular(true);
//! let suggestions = suggester.suggest_with("helo", 3, &options)?;
//! assert_eq!(suggestions[0].word, "hello");
//! # Ok::<(), gramspell_core::SuggestError>(())
//! ```

pub mod analyzer;
pub mod arena;
pub mod dictionary;
pub mod frequency;
pub mod index;
pub mod indexer;
pub mod suggest;

pub use dictionary::{stream_words, PlainTextDictionary};
pub use frequency::TermFrequencies;
pub use index::{GramIndex, GramQuery, IndexStats};
pub use indexer::{DictionaryIndexer, IndexReport};
pub use suggest::{
    DamerauLevenshtein, EditDistance, EngineMetrics, Levenshtein, SuggestOptions, Suggester,
    SuggestionQueue,
};

pub use gramspell_types::{
    EntryId, FieldKey, FrequencySource, GramRole, Hit, Result, SuggestError, Suggestion,
    SuggesterConfig, Term,
};
