//! Gram extraction.
//!
//! Provides the gram-length window policy and sliding-window extraction of
//! fixed-length character grams. Grams are the unit of both indexing and
//! retrieval.

use core::ops::RangeInclusive;
use smallvec::SmallVec;

/// Gram lengths used for a word of a given character length.
///
/// | length | min | max |
/// |--------|-----|-----|
/// | <= 4   | 1   | 2   |
/// | 5      | 2   | 3   |
/// | > 5    | 3   | 4   |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GramWindow {
    pub min: usize,
    pub max: usize,
}

impl GramWindow {
    /// Window for a word of `len` characters.
    #[inline(always)]
    pub const fn for_len(len: usize) -> Self {
        match len {
            0..=4 => Self { min: 1, max: 2 },
            5 => Self { min: 2, max: 3 },
            _ => Self { min: 3, max: 4 },
        }
    }

    /// Window for `text`, measured in characters.
    #[inline]
    pub fn for_word(text: &str) -> Self {
        Self::for_len(text.chars().count())
    }

    #[inline(always)]
    pub const fn range(self) -> RangeInclusive<usize> {
        self.min..=self.max
    }
}

/// Extracts grams of `ng` characters using a sliding window of step 1.
///
/// For text of `n >= ng` characters exactly `n - ng + 1` grams are emitted,
/// left to right, duplicates included. Shorter text emits nothing.
///
/// # Example
///
/// ```
/// use gramspell_core::analyzer::gram::extract_grams;
///
/// let mut grams = Vec::new();
/// extract_grams("hello", 3, |g| grams.push(g));
///
/// assert_eq!(grams, vec!["hel", "ell", "llo"]);
/// ```
#[inline]
pub fn extract_grams<'a, F>(text: &'a str, ng: usize, mut callback: F)
where
    F: FnMut(&'a str),
{
    if ng == 0 {
        return;
    }

    // Byte windows are character windows for ASCII
    if text.is_ascii() {
        if text.len() < ng {
            return;
        }
        for start in 0..=text.len() - ng {
            callback(&text[start..start + ng]);
        }
        return;
    }

    let mut bounds: SmallVec<[usize; 32]> = text.char_indices().map(|(i, _)| i).collect();
    bounds.push(text.len());
    for window in bounds.windows(ng + 1) {
        callback(&text[window[0]..window[ng]]);
    }
}

/// Collects the grams of `text` into a vector.
///
/// See [`extract_grams`].
pub fn form_grams(text: &str, ng: usize) -> Vec<&str> {
    let mut grams = Vec::with_capacity(count_grams(text, ng));
    extract_grams(text, ng, |g| grams.push(g));
    grams
}

/// Counts grams without allocating.
///
/// Returns 0 when `text` is shorter than `ng` characters.
#[inline]
pub fn count_grams(text: &str, ng: usize) -> usize {
    let len = text.chars().count();
    if ng == 0 || len < ng {
        0
    } else {
        len - ng + 1
    }
}

/// Whether `text` is free of control characters (other than whitespace).
#[inline]
pub fn is_indexable(text: &str) -> bool {
    !text
        .bytes()
        .any(|b| matches!(b, 0x00..=0x08 | 0x0B | 0x0C | 0x0E..=0x1F | 0x7F))
}
