//! Weighted gram queries.
//!
//! A query token becomes a disjunction of term clauses. For every gram
//! length in the token's window:
//!
//! ```text
//! start<ng>:<first gram>^start_boost
//! end<ng>:<last gram>^end_boost
//! gram<ng>:<g>            (once per gram occurrence, weight 1)
//! ```
//!
//! An entry's score is the sum of the weights of the clauses it matches.

use core::fmt;

use crate::analyzer::gram::{extract_grams, GramWindow};
use crate::index::types::INLINE_CLAUSES;
use gramspell_types::{FieldKey, Term};
use smallvec::SmallVec;

/// A single weighted term clause.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clause {
    pub term: Term,
    pub weight: f32,
}

/// Disjunctive multi-clause gram query.
#[derive(Clone, Debug, Default)]
pub struct GramQuery {
    clauses: SmallVec<[Clause; INLINE_CLAUSES]>,
}

impl GramQuery {
    /// Weight of a plain `gram<ng>` clause.
    pub const GRAM_WEIGHT: f32 = 1.0;

    /// Builds the query for `token`.
    ///
    /// A boost `<= 0` leaves out the corresponding start or end clauses.
    /// Gram lengths the token is too short for contribute nothing.
    pub fn for_token(token: &str, start_boost: f32, end_boost: f32) -> Self {
        let mut clauses = SmallVec::new();

        for ng in GramWindow::for_word(token).range() {
            let key = ng as u8;
            let mut grams: SmallVec<[&str; INLINE_CLAUSES]> = SmallVec::new();
            extract_grams(token, ng, |g| grams.push(g));

            let (Some(&first), Some(&last)) = (grams.first(), grams.last()) else {
                continue;
            };

            if start_boost > 0.0 {
                clauses.push(Clause {
                    term: Term::new(FieldKey::start(key), first),
                    weight: start_boost,
                });
            }
            if end_boost > 0.0 {
                clauses.push(Clause {
                    term: Term::new(FieldKey::end(key), last),
                    weight: end_boost,
                });
            }
            for gram in grams {
                clauses.push(Clause {
                    term: Term::new(FieldKey::gram(key), gram),
                    weight: Self::GRAM_WEIGHT,
                });
            }
        }

        Self { clauses }
    }

    #[inline(always)]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Clauses with identical terms folded together, weights summed,
    /// sorted by term.
    ///
    /// Scoring is unchanged: an entry matching a term matches every copy.
    pub fn coalesced(&self) -> SmallVec<[Clause; INLINE_CLAUSES]> {
        let mut sorted = self.clauses.clone();
        sorted.sort_unstable_by(|a, b| a.term.cmp(&b.term));

        let mut out: SmallVec<[Clause; INLINE_CLAUSES]> = SmallVec::with_capacity(sorted.len());
        for clause in sorted {
            if let Some(prev) = out.last_mut() {
                if prev.term == clause.term {
                    prev.weight += clause.weight;
                    continue;
                }
            }
            out.push(clause);
        }
        out
    }
}

impl fmt::Display for GramQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", clause.term)?;
            if clause.weight != Self::GRAM_WEIGHT {
                write!(f, "^{}", clause.weight)?;
            }
        }
        Ok(())
    }
}
