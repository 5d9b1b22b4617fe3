//! Gram postings index.
//!
//! Maps `(field, gram)` terms to the word entries carrying them, where a
//! field is `gram<ng>`, `start<ng>` or `end<ng>`.
//!
//! Memory Layout:
//! - Posting lists are stored in a single contiguous array
//! - Term metadata is stored in blocks sorted by packed term for binary search
//! - Words live in an arena; a lexicon of ids sorted by word answers `contains`
//!
//! Threading:
//! - A [`GramIndex`] is immutable once committed and is shared between
//!   readers behind an `Arc`. Per-query scratch space is owned by the call.

mod api;
mod builder;
mod query;
mod scoring;
mod search;
mod stats;
mod types;

pub use builder::GramIndexWriter;
pub use query::{Clause, GramQuery};
pub use stats::IndexStats;
pub use types::{GramIndex, Posting};
