//! Property-based tests for suggestion ranking and indexing
//!
//! Tests invariants:
//! - Never more suggestions than asked for
//! - Scores never increase down the list and never drop below the minimum
//! - Every suggestion is a dictionary word
//! - Gram extraction yields `n - ng + 1` grams
//! - Re-indexing the same words changes nothing
//! - Incremental builds answer like a single build

use gramspell_core::analyzer::{count_grams, form_grams};
use gramspell_core::{SuggestOptions, Suggester, SuggesterConfig};
use proptest::prelude::*;

fn dictionary_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]{3,8}", 1..40)
}

fn indexed(words: &[String]) -> Suggester {
    let suggester = Suggester::new();
    suggester
        .index_dictionary(words.iter())
        .expect("should index");
    suggester
}

proptest! {
    #[test]
    fn suggestions_are_bounded_ranked_and_known(
        dictionary in dictionary_strategy(),
        token in "[a-e]{1,8}",
        max in 0usize..10,
        suggest_self in any::<bool>(),
    ) {
        let suggester = indexed(&dictionary);
        let options = SuggestOptions::default().suggest_self(suggest_self);
        let suggestions = suggester
            .suggest_with(&token, max, &options)
            .expect("should suggest");

        prop_assert!(suggestions.len() <= max);

        let min_score = SuggesterConfig::default().min_score;
        for s in &suggestions {
            let score = s.score.expect("scored");
            prop_assert!(score >= min_score);
            prop_assert!(score <= 1.0);
            prop_assert!(suggester.contains(&s.word));
            if !suggest_self {
                prop_assert_ne!(&s.word, &token);
            }
        }
        for pair in suggestions.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn gram_count_matches_length(text in "[a-zé日]{0,12}", ng in 1usize..=4) {
        let len = text.chars().count();
        let expected = if len >= ng { len - ng + 1 } else { 0 };

        let grams = form_grams(&text, ng);
        prop_assert_eq!(grams.len(), expected);
        prop_assert_eq!(count_grams(&text, ng), expected);
        for gram in grams {
            prop_assert_eq!(gram.chars().count(), ng);
        }
    }

    #[test]
    fn reindexing_is_idempotent(dictionary in dictionary_strategy(), token in "[a-e]{2,8}") {
        let suggester = indexed(&dictionary);
        let before = suggester.suggest(&token, 5).expect("should suggest");
        let len = suggester.len();

        let report = suggester
            .index_dictionary(dictionary.iter())
            .expect("should index");
        prop_assert_eq!(report.accepted, 0);
        prop_assert_eq!(suggester.len(), len);
        prop_assert_eq!(suggester.suggest(&token, 5).expect("should suggest"), before);
    }

    #[test]
    fn incremental_matches_single_build(
        dictionary in dictionary_strategy(),
        split in 0usize..40,
        token in "[a-e]{2,8}",
    ) {
        let split = split.min(dictionary.len());
        let (first, second) = dictionary.split_at(split);

        let incremental = indexed(first);
        incremental
            .index_dictionary(second.iter())
            .expect("should index");
        let single = indexed(&dictionary);

        prop_assert_eq!(incremental.len(), single.len());
        prop_assert_eq!(
            incremental.suggest(&token, 5).expect("should suggest"),
            single.suggest(&token, 5).expect("should suggest")
        );
    }
}
