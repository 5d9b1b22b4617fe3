//! Core types and traits for the gramspell suggestion engine.
//!
//! This crate holds the values that cross the boundary between the engine
//! and its callers. Keeping them separate keeps the engine crate free to
//! change its internal layout without touching caller-facing types:
//!
//! - **Keys**: [`GramRole`], [`FieldKey`] and the packed [`Term`]
//! - **Results**: [`Hit`] (retrieval) and [`Suggestion`] (pipeline output)
//! - **Configuration**: [`SuggesterConfig`]
//! - **Collaborators**: the [`FrequencySource`] trait
//! - **Errors**: [`SuggestError`]

#![warn(missing_docs)]

use core::fmt;
use core::str::FromStr;

/// Word entry identifier.
///
/// Ids are dense and assigned in acceptance order, so a snapshot with `n`
/// entries uses ids `0..n`.
pub type EntryId = u32;

/// Result alias used throughout gramspell.
pub type Result<T> = std::result::Result<T, SuggestError>;

/// Errors raised by the suggestion engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SuggestError {
    /// Storage or I/O failure while building or reading an index or a
    /// frequency source.
    #[error("index unavailable: {0}")]
    IndexUnavailable(String),

    /// An entry id was resolved against a snapshot that does not hold it.
    #[error("word entry {0} not found in the current snapshot")]
    NotFound(EntryId),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A field key string could not be parsed.
    #[error("invalid field key: {0:?}")]
    InvalidFieldKey(String),
}

impl SuggestError {
    /// Whether the failure may succeed on a later attempt.
    ///
    /// The engine never retries on its own; this is advice for callers.
    pub fn is_retriable(&self) -> bool {
        matches!(self, SuggestError::IndexUnavailable(_))
    }
}

impl From<std::io::Error> for SuggestError {
    fn from(err: std::io::Error) -> Self {
        SuggestError::IndexUnavailable(err.to_string())
    }
}

/// Role a gram plays inside a word.
///
/// `#[repr(u8)]` keeps the discriminant stable because it is packed into
/// the top byte of a [`Term`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum GramRole {
    /// Any gram occurrence.
    Gram = 0,
    /// The first gram of a word.
    Start = 1,
    /// The last gram of a word.
    End = 2,
}

impl GramRole {
    /// Field name prefix for this role.
    #[inline(always)]
    pub const fn prefix(self) -> &'static str {
        match self {
            GramRole::Gram => "gram",
            GramRole::Start => "start",
            GramRole::End => "end",
        }
    }

    /// Inverse of `self as u8`.
    #[inline(always)]
    pub const fn from_repr(value: u8) -> Option<Self> {
        match value {
            0 => Some(GramRole::Gram),
            1 => Some(GramRole::Start),
            2 => Some(GramRole::End),
            _ => None,
        }
    }
}

/// Posting field: a gram role at a particular gram length.
///
/// Renders as `gram<ng>`, `start<ng>` or `end<ng>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldKey {
    /// Role of the gram.
    pub role: GramRole,
    /// Gram length in characters.
    pub ng: u8,
}

impl FieldKey {
    /// Creates a field key.
    #[inline(always)]
    pub const fn new(role: GramRole, ng: u8) -> Self {
        Self { role, ng }
    }

    /// `gram<ng>`
    #[inline(always)]
    pub const fn gram(ng: u8) -> Self {
        Self::new(GramRole::Gram, ng)
    }

    /// `start<ng>`
    #[inline(always)]
    pub const fn start(ng: u8) -> Self {
        Self::new(GramRole::Start, ng)
    }

    /// `end<ng>`
    #[inline(always)]
    pub const fn end(ng: u8) -> Self {
        Self::new(GramRole::End, ng)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.role.prefix(), self.ng)
    }
}

impl FromStr for FieldKey {
    type Err = SuggestError;

    fn from_str(s: &str) -> Result<Self> {
        let digits_at = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| SuggestError::InvalidFieldKey(s.to_string()))?;
        let (prefix, digits) = s.split_at(digits_at);
        let role = match prefix {
            "gram" => GramRole::Gram,
            "start" => GramRole::Start,
            "end" => GramRole::End,
            _ => return Err(SuggestError::InvalidFieldKey(s.to_string())),
        };
        let ng: u8 = digits
            .parse()
            .map_err(|_| SuggestError::InvalidFieldKey(s.to_string()))?;
        if ng == 0 || ng as usize > Term::MAX_GRAM_CHARS {
            return Err(SuggestError::InvalidFieldKey(s.to_string()));
        }
        Ok(Self::new(role, ng))
    }
}

/// A (field, gram) posting key packed into a single `u128`.
///
/// Layout, most significant first:
///
/// ```text
/// [role: 8][ng: 8][unused: 16][c0: 24][c1: 24][c2: 24][c3: 24]
/// ```
///
/// Each character slot stores `code_point + 1`, leaving `0` for an empty
/// slot. Integer order is therefore (role, ng, gram) with grams compared
/// code point by code point, which lets posting blocks be binary searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Term(u128);

impl Term {
    /// Longest gram a term can hold.
    pub const MAX_GRAM_CHARS: usize = 4;

    const CHAR_BITS: u32 = 24;
    const CHAR_MASK: u128 = (1 << Self::CHAR_BITS) - 1;
    const ROLE_SHIFT: u32 = 120;
    const NG_SHIFT: u32 = 112;

    /// Packs a field and a gram.
    ///
    /// Characters beyond [`Term::MAX_GRAM_CHARS`] are dropped; the gram
    /// window never produces grams that long.
    #[inline]
    pub fn new(field: FieldKey, gram: &str) -> Self {
        debug_assert!(
            gram.chars().count() <= Self::MAX_GRAM_CHARS,
            "gram {gram:?} exceeds {} characters",
            Self::MAX_GRAM_CHARS
        );
        let mut packed =
            ((field.role as u128) << Self::ROLE_SHIFT) | ((field.ng as u128) << Self::NG_SHIFT);
        for (slot, c) in gram.chars().take(Self::MAX_GRAM_CHARS).enumerate() {
            packed |= (c as u128 + 1) << Self::slot_shift(slot);
        }
        Self(packed)
    }

    #[inline(always)]
    const fn slot_shift(slot: usize) -> u32 {
        Self::CHAR_BITS * (Self::MAX_GRAM_CHARS - 1 - slot) as u32
    }

    /// Returns the field this term belongs to.
    #[inline(always)]
    pub fn field(self) -> FieldKey {
        let role = GramRole::from_repr((self.0 >> Self::ROLE_SHIFT) as u8).unwrap_or(GramRole::Gram);
        FieldKey::new(role, (self.0 >> Self::NG_SHIFT) as u8)
    }

    /// Iterates the gram's characters.
    pub fn chars(self) -> impl Iterator<Item = char> {
        (0..Self::MAX_GRAM_CHARS)
            .map(move |slot| ((self.0 >> Self::slot_shift(slot)) & Self::CHAR_MASK) as u32)
            .take_while(|&v| v != 0)
            .filter_map(|v| char::from_u32(v - 1))
    }

    /// Returns the gram as an owned string.
    pub fn gram(self) -> String {
        self.chars().collect()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.field())?;
        for c in self.chars() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Retrieval hit: a word entry and its aggregate clause score.
///
/// Ordering is by rank: a hit compares greater when it has a higher score,
/// or the same score and a lower entry id. Sorting descending therefore
/// yields score-descending, id-ascending order.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// Word entry identifier
    pub entry: EntryId,
    /// Sum of the weights of the matching clauses
    pub score: f32,
}

impl Hit {
    /// Creates a new hit.
    #[inline(always)]
    pub const fn new(entry: EntryId, score: f32) -> Self {
        Self { entry, score }
    }
}

impl PartialEq for Hit {
    fn eq(&self, other: &Self) -> bool {
        self.entry == other.entry && self.score == other.score
    }
}

impl Eq for Hit {}

impl PartialOrd for Hit {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hit {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.entry.cmp(&self.entry))
    }
}

impl fmt::Display for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry={} score={:.3}", self.entry, self.score)
    }
}

/// A suggested replacement for a query token.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// The suggested word.
    pub word: String,
    /// Normalized edit-distance similarity in `[0, 1]`.
    ///
    /// `None` for the "already correct" short-circuit result.
    pub score: Option<f32>,
    /// Frequency reported by the frequency source, when one was consulted.
    pub frequency: Option<u64>,
}

impl Suggestion {
    /// A suggestion with no score and no frequency.
    pub fn unscored(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            score: None,
            frequency: None,
        }
    }

    /// A scored suggestion.
    pub fn scored(word: impl Into<String>, score: f32) -> Self {
        Self {
            word: word.into(),
            score: Some(score),
            frequency: None,
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word)?;
        if let Some(score) = self.score {
            write!(f, " score={score:.3}")?;
        }
        if let Some(freq) = self.frequency {
            write!(f, " freq={freq}")?;
        }
        Ok(())
    }
}

/// External corpus statistics used to gate and rank suggestions.
///
/// The engine only ever reads from a frequency source.
pub trait FrequencySource {
    /// Number of documents (or occurrences) containing `term` under `field`.
    ///
    /// # Errors
    ///
    /// Implementations backed by storage report failures as
    /// [`SuggestError::IndexUnavailable`].
    fn frequency_of(&self, field: &str, term: &str) -> Result<u64>;
}

impl<F> FrequencySource for F
where
    F: Fn(&str, &str) -> u64,
{
    #[inline]
    fn frequency_of(&self, field: &str, term: &str) -> Result<u64> {
        Ok(self(field, term))
    }
}

/// Suggester configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggesterConfig {
    /// Minimum normalized similarity a suggestion must reach, in `(0, 1)`.
    /// Default: 0.5
    pub min_score: f32,
    /// Weight of the `start<ng>` clause. `<= 0` omits the clause.
    /// Default: 2.0
    pub start_boost: f32,
    /// Weight of the `end<ng>` clause. `<= 0` omits the clause.
    /// Default: 1.0
    pub end_boost: f32,
    /// Whether the query token may be suggested for itself.
    pub suggest_self: bool,
    /// Whether only words more frequent than the query token are suggested.
    pub suggest_only_more_popular: bool,
    /// Retrieval hits examined per requested suggestion.
    /// Default: 10
    pub hit_enumerations_per_suggestion: usize,
    /// Shortest word accepted by the dictionary indexer. Values below 2 are
    /// clamped to 2.
    /// Default: 3
    pub min_token_length: usize,
}

impl Default for SuggesterConfig {
    fn default() -> Self {
        Self {
            min_score: 0.5,
            start_boost: 2.0,
            end_boost: 1.0,
            suggest_self: false,
            suggest_only_more_popular: false,
            hit_enumerations_per_suggestion: 10,
            min_token_length: 3,
        }
    }
}

impl SuggesterConfig {
    /// Floor for [`SuggesterConfig::min_token_length`].
    pub const MIN_TOKEN_LENGTH_FLOOR: usize = 2;

    /// Only close matches; examines fewer hits.
    pub const fn strict() -> Self {
        Self {
            min_score: 0.7,
            start_boost: 2.0,
            end_boost: 1.0,
            suggest_self: false,
            suggest_only_more_popular: false,
            hit_enumerations_per_suggestion: 5,
            min_token_length: 3,
        }
    }

    /// Looser matches; examines more hits and indexes two-letter words.
    pub const fn lenient() -> Self {
        Self {
            min_score: 0.3,
            start_boost: 2.0,
            end_boost: 1.0,
            suggest_self: false,
            suggest_only_more_popular: false,
            hit_enumerations_per_suggestion: 20,
            min_token_length: 2,
        }
    }

    /// `min_token_length` clamped to its floor.
    #[inline(always)]
    pub fn effective_min_token_length(&self) -> usize {
        self.min_token_length.max(Self::MIN_TOKEN_LENGTH_FLOOR)
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_score > 0.0 && self.min_score < 1.0) {
            return Err(SuggestError::InvalidConfig(format!(
                "min_score must be in (0, 1), got {}",
                self.min_score
            )));
        }
        if !self.start_boost.is_finite() || !self.end_boost.is_finite() {
            return Err(SuggestError::InvalidConfig(format!(
                "boosts must be finite, got start={} end={}",
                self.start_boost, self.end_boost
            )));
        }
        if self.hit_enumerations_per_suggestion == 0 {
            return Err(SuggestError::InvalidConfig(
                "hit_enumerations_per_suggestion must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
