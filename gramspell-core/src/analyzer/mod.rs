//! Word analysis.
//!
//! Words reach the engine already normalized; analysis here only decides
//! which gram lengths a word gets and cuts it into grams:
//! - **Window**: gram-length range for a word length
//! - **Grams**: sliding-window extraction over characters

pub mod gram;

pub use gram::{count_grams, extract_grams, form_grams, is_indexable, GramWindow};
