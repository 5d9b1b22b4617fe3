use std::io::{self, Write};
use std::sync::Arc;
use std::thread;

use gramspell_core::dictionary::stream_words_from_path;
use gramspell_core::{
    PlainTextDictionary, SuggestError, SuggestOptions, Suggester, SuggesterConfig, Suggestion,
    TermFrequencies,
};

fn words(suggestions: &[Suggestion]) -> Vec<&str> {
    suggestions.iter().map(|s| s.word.as_str()).collect()
}

fn engine(dictionary: &[&str]) -> Suggester {
    let suggester = Suggester::new();
    suggester
        .index_dictionary(dictionary.iter().copied())
        .expect("should index");
    suggester
}

#[test]
fn misspelling_finds_neighbours() {
    let suggester = engine(&["hello", "hallo", "hullo", "world"]);
    let suggestions = suggester.suggest("helo", 5).expect("should suggest");

    assert_eq!(words(&suggestions), vec!["hello", "hallo", "hullo"]);
    assert_eq!(suggestions[0].score, Some(0.75));
    assert_eq!(suggestions[1].score, Some(0.5));
    assert_eq!(suggestions[2].score, Some(0.5));
    assert!(suggestions.iter().all(|s| s.frequency.is_none()));
}

#[test]
fn known_word_is_returned_as_is() {
    let suggester = engine(&["hello", "hallo"]);
    let mut corpus = TermFrequencies::new();
    corpus.set("body", "hello", 5);

    let options = SuggestOptions::default().frequency(&corpus, "body");
    let suggestions = suggester
        .suggest_with("hello", 5, &options)
        .expect("should suggest");

    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].word, "hello");
    assert_eq!(suggestions[0].score, None);
}

#[test]
fn unknown_word_with_frequency_source_is_gated() {
    let suggester = engine(&["hello", "hallo", "hullo"]);
    let mut corpus = TermFrequencies::new();
    corpus.add_document("body", ["hello", "world"]);
    corpus.add_document("body", ["hello"]);
    corpus.add_document("body", ["hallo"]);

    let options = SuggestOptions::default().frequency(&corpus, "body");
    let suggestions = suggester
        .suggest_with("helo", 5, &options)
        .expect("should suggest");

    // hullo never occurs in the corpus
    assert_eq!(words(&suggestions), vec!["hello", "hallo"]);
    assert_eq!(suggestions[0].frequency, Some(2));
    assert_eq!(suggestions[1].frequency, Some(1));
}

#[test]
fn only_more_popular_drops_rarer_words() {
    let suggester = engine(&["hello", "hallo", "hullo"]);
    let mut corpus = TermFrequencies::new();
    corpus.set("body", "helo", 4);
    corpus.set("body", "hello", 4);
    corpus.set("body", "hallo", 3);
    corpus.set("body", "hullo", 9);

    let options = SuggestOptions::default()
        .frequency(&corpus, "body")
        .only_more_popular(true);
    let suggestions = suggester
        .suggest_with("helo", 5, &options)
        .expect("should suggest");

    // equal frequency passes, lower does not
    assert_eq!(words(&suggestions), vec!["hello", "hullo"]);
}

#[test]
fn closure_frequency_source() {
    let suggester = engine(&["hello", "hallo"]);
    let source = |_field: &str, term: &str| u64::from(term == "hallo");

    let options = SuggestOptions::default().frequency(&source, "body");
    let suggestions = suggester
        .suggest_with("helo", 5, &options)
        .expect("should suggest");
    assert_eq!(words(&suggestions), vec!["hallo"]);
}

#[test]
fn duplicate_words_index_once() {
    let suggester = Suggester::new();
    let report = suggester
        .index_dictionary(["hello", "hello", "hallo"])
        .expect("should index");
    assert_eq!(report.accepted, 2);
    assert_eq!(report.skipped_duplicate, 1);
    assert_eq!(suggester.len(), 2);

    let options = SuggestOptions::default().suggest_self(true);
    let suggestions = suggester
        .suggest_with("hello", 5, &options)
        .expect("should suggest");
    let hellos = suggestions.iter().filter(|s| s.word == "hello").count();
    assert_eq!(hellos, 1);
}

#[test]
fn short_words_are_never_suggested() {
    let suggester = engine(&["on", "one", "ones"]);
    assert!(!suggester.contains("on"));

    let options = SuggestOptions::default().suggest_self(true);
    let suggestions = suggester
        .suggest_with("on", 5, &options)
        .expect("should suggest");
    assert!(!words(&suggestions).contains(&"on"));
}

#[test]
fn explicit_min_token_length() {
    let suggester = Suggester::new();
    let report = suggester
        .index_dictionary_with(["on", "one"], 2)
        .expect("should index");
    assert_eq!(report.accepted, 2);
    assert!(suggester.contains("on"));
}

#[test]
fn max_bounds_results() {
    let suggester = engine(&["cart", "dart", "part", "wart", "tart"]);
    assert!(suggester.suggest("bart", 0).expect("should suggest").is_empty());
    assert_eq!(suggester.suggest("bart", 2).expect("should suggest").len(), 2);
    assert_eq!(suggester.suggest("bart", 50).expect("should suggest").len(), 5);
}

#[test]
fn long_word_is_suggested_for_itself() {
    let long = "a".repeat(300);
    let suggester = Suggester::new();
    let report = suggester
        .index_dictionary_with([long.as_str()], 3)
        .expect("should index");
    assert_eq!(report.accepted, 1);

    let options = SuggestOptions::default().suggest_self(true);
    let suggestions = suggester
        .suggest_with(&long, 3, &options)
        .expect("should suggest");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].word, long);
    assert_eq!(suggestions[0].score, Some(1.0));
}

/// One close word that shares a single boosted trigram with the query,
/// behind four words that share the query's whole four-letter prefix but
/// are otherwise unrelated.
fn crowded_engine() -> Suggester {
    engine(&[
        "abcdzzzzzzzz",
        "abcdyyyyyyyy",
        "abcdwwwwwwww",
        "abcdvvvvvvvv",
        "abcxefyh",
    ])
}

#[test]
fn candidate_budget_limits_what_is_rescored() {
    let suggester = crowded_engine();

    // default budget: 1 x 10 candidates reach the close word
    let suggestions = suggester.suggest("abcdefgh", 1).expect("should suggest");
    assert_eq!(words(&suggestions), vec!["abcxefyh"]);
    assert_eq!(suggestions[0].score, Some(0.75));

    // a single candidate is one of the prefix words, which rescores below min_score
    let options = SuggestOptions::default().hit_enumerations_per_suggestion(1);
    let suggestions = suggester
        .suggest_with("abcdefgh", 1, &options)
        .expect("should suggest");
    assert!(suggestions.is_empty());

    // the budget scales with max
    let suggestions = suggester
        .suggest_with("abcdefgh", 5, &options)
        .expect("should suggest");
    assert_eq!(words(&suggestions), vec!["abcxefyh"]);
}

#[test]
fn zero_hit_enumerations_behaves_like_one() {
    let suggester = crowded_engine();
    let zero = SuggestOptions::default().hit_enumerations_per_suggestion(0);
    let one = SuggestOptions::default().hit_enumerations_per_suggestion(1);

    assert!(suggester
        .suggest_with("abcdefgh", 1, &zero)
        .expect("should suggest")
        .is_empty());

    // still retrieves one candidate rather than none
    let near = suggester
        .suggest_with("abcdzzzzzzzy", 1, &zero)
        .expect("should suggest");
    assert_eq!(words(&near), vec!["abcdzzzzzzzz"]);
    assert_eq!(
        near,
        suggester
            .suggest_with("abcdzzzzzzzy", 1, &one)
            .expect("should suggest")
    );
}

#[test]
fn empty_dictionary_suggests_nothing() {
    let suggester = Suggester::new();
    assert!(suggester.suggest("hello", 5).expect("should suggest").is_empty());
}

#[test]
fn strict_config_raises_the_bar() {
    let suggester = Suggester::with_config(SuggesterConfig::strict()).expect("valid config");
    suggester
        .index_dictionary(["hello", "hallo", "hullo"])
        .expect("should index");
    let suggestions = suggester.suggest("helo", 5).expect("should suggest");
    assert_eq!(words(&suggestions), vec!["hello"]);
}

#[test]
fn incremental_builds_extend_the_dictionary() {
    let suggester = engine(&["hello"]);
    assert!(words(&suggester.suggest("helo", 5).expect("should suggest")) == vec!["hello"]);

    let report = suggester
        .index_dictionary(["hallo", "hello"])
        .expect("should index");
    assert_eq!(report.accepted, 1);
    assert_eq!(report.skipped_duplicate, 1);
    assert_eq!(report.generation, 2);

    let suggestions = suggester.suggest("helo", 5).expect("should suggest");
    assert_eq!(words(&suggestions), vec!["hello", "hallo"]);
}

#[test]
fn failed_build_keeps_current_snapshot() {
    let suggester = engine(&["hello"]);
    let source: Vec<io::Result<String>> = vec![
        Ok("hallo".to_string()),
        Err(io::Error::new(io::ErrorKind::Other, "disk gone")),
    ];

    let err = suggester
        .try_index_dictionary(source)
        .expect_err("should fail");
    assert!(matches!(err, SuggestError::IndexUnavailable(_)));
    assert!(err.is_retriable());

    assert!(!suggester.contains("hallo"));
    assert_eq!(suggester.metrics().generation, 1);
}

#[test]
fn dictionary_files_load() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "hello\n\n  hallo  \r\nhullo\nworld").expect("write");

    let dictionary = PlainTextDictionary::from_path(file.path()).expect("should load");
    let suggester = Suggester::new();
    let report = suggester
        .index_dictionary(dictionary.words())
        .expect("should index");
    assert_eq!(report.accepted, 4);

    let streamed = Suggester::new();
    let report = streamed
        .try_index_dictionary(stream_words_from_path(file.path()).expect("open"))
        .expect("should index");
    assert_eq!(report.accepted, 4);

    assert_eq!(
        suggester.suggest("helo", 5).expect("should suggest"),
        streamed.suggest("helo", 5).expect("should suggest")
    );
}

#[test]
fn readers_see_whole_snapshots_during_rebuilds() {
    let suggester = Arc::new(engine(&["hello", "hallo"]));
    let batches: Vec<Vec<String>> = (0..20)
        .map(|b| (0..50).map(|i| format!("word{b:02}x{i:03}")).collect())
        .collect();

    thread::scope(|scope| {
        for _ in 0..4 {
            let suggester = Arc::clone(&suggester);
            scope.spawn(move || {
                for _ in 0..200 {
                    let snapshot = suggester.snapshot();
                    let len = snapshot.len();
                    // a held snapshot never changes
                    assert!(snapshot.contains("hello"));
                    assert_eq!(snapshot.len(), len);

                    let suggestions = suggester.suggest("helo", 3).expect("should suggest");
                    assert!(suggestions.len() <= 3);
                    assert_eq!(suggestions[0].word, "hello");
                }
            });
        }

        for batch in &batches {
            suggester
                .index_dictionary(batch.iter())
                .expect("should index");
        }
    });

    assert_eq!(suggester.len(), 2 + 20 * 50);
    let metrics = suggester.metrics();
    assert_eq!(metrics.generation, 21);
    assert_eq!(metrics.words_indexed, 2 + 20 * 50);
    assert_eq!(metrics.queries_executed, 4 * 200);
}
