//! Edit distance and normalized similarity.

/// String edit distance.
pub trait EditDistance {
    /// Minimum number of edits turning `a` into `b`.
    fn distance(&self, a: &str, b: &str) -> usize;
}

/// Classic Levenshtein distance: single-character insert, delete, substitute.
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl EditDistance for Levenshtein {
    #[inline]
    fn distance(&self, a: &str, b: &str) -> usize {
        strsim::levenshtein(a, b)
    }
}

/// Levenshtein distance that also counts adjacent transpositions as one edit.
#[derive(Debug, Clone, Copy, Default)]
pub struct DamerauLevenshtein;

impl EditDistance for DamerauLevenshtein {
    #[inline]
    fn distance(&self, a: &str, b: &str) -> usize {
        strsim::damerau_levenshtein(a, b)
    }
}

/// `1 - distance / min(len(candidate), len(query))`, lengths in characters.
///
/// Can be negative for very dissimilar strings. Returns 0 when either
/// string is empty.
#[inline]
pub fn similarity<D>(metric: &D, candidate: &str, query: &str) -> f32
where
    D: EditDistance + ?Sized,
{
    let shorter = candidate.chars().count().min(query.chars().count());
    if shorter == 0 {
        return 0.0;
    }
    1.0 - metric.distance(candidate, query) as f32 / shorter as f32
}
