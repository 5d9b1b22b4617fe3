//! In-memory corpus frequencies.

use rustc_hash::{FxHashMap, FxHashSet};

use gramspell_types::{FrequencySource, Result};

/// Document frequencies per field, for gating suggestions on a corpus.
///
/// A term's frequency is the number of documents it appears in under a
/// field, so repeats within one document count once.
#[derive(Debug, Clone, Default)]
pub struct TermFrequencies {
    fields: FxHashMap<Box<str>, FieldCounts>,
}

#[derive(Debug, Clone, Default)]
struct FieldCounts {
    documents: u64,
    terms: FxHashMap<Box<str>, u64>,
}

impl TermFrequencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one document whose `field` holds `terms`.
    pub fn add_document<I>(&mut self, field: &str, terms: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let counts = self.fields.entry(field.into()).or_default();
        counts.documents += 1;

        let mut seen: FxHashSet<Box<str>> = FxHashSet::default();
        for term in terms {
            let term = term.as_ref();
            if seen.contains(term) {
                continue;
            }
            seen.insert(term.into());
            *counts.terms.entry(term.into()).or_insert(0) += 1;
        }
    }

    /// Overrides the frequency of `term` under `field`.
    pub fn set(&mut self, field: &str, term: &str, frequency: u64) {
        self.fields
            .entry(field.into())
            .or_default()
            .terms
            .insert(term.into(), frequency);
    }

    /// Frequency of `term` under `field`; 0 if never seen.
    pub fn get(&self, field: &str, term: &str) -> u64 {
        self.fields
            .get(field)
            .and_then(|counts| counts.terms.get(term))
            .copied()
            .unwrap_or(0)
    }

    /// Documents recorded under `field` through [`add_document`](Self::add_document).
    pub fn documents(&self, field: &str) -> u64 {
        self.fields.get(field).map_or(0, |counts| counts.documents)
    }

    /// Distinct terms with a frequency under `field`.
    pub fn term_count(&self, field: &str) -> usize {
        self.fields.get(field).map_or(0, |counts| counts.terms.len())
    }
}

impl FrequencySource for TermFrequencies {
    #[inline]
    fn frequency_of(&self, field: &str, term: &str) -> Result<u64> {
        Ok(self.get(field, term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_documents_not_occurrences() {
        let mut corpus = TermFrequencies::new();
        corpus.add_document("body", ["hello", "hello", "world"]);
        corpus.add_document("body", ["hello"]);

        assert_eq!(corpus.get("body", "hello"), 2);
        assert_eq!(corpus.get("body", "world"), 1);
        assert_eq!(corpus.get("body", "missing"), 0);
        assert_eq!(corpus.documents("body"), 2);
        assert_eq!(corpus.term_count("body"), 2);
    }

    #[test]
    fn fields_are_independent() {
        let mut corpus = TermFrequencies::new();
        corpus.add_document("title", ["hello"]);
        corpus.set("body", "hello", 7);

        assert_eq!(corpus.frequency_of("title", "hello"), Ok(1));
        assert_eq!(corpus.frequency_of("body", "hello"), Ok(7));
        assert_eq!(corpus.frequency_of("tag", "hello"), Ok(0));
    }

    #[test]
    fn closures_are_sources() {
        let source = |_field: &str, term: &str| -> u64 {
            if term == "hello" {
                3
            } else {
                0
            }
        };
        assert_eq!(source.frequency_of("body", "hello"), Ok(3));
        assert_eq!(source.frequency_of("body", "helo"), Ok(0));
    }
}
