//! Clause score accumulation.

use crate::index::types::{Candidate, GramIndex, Posting};

impl GramIndex {
    /// Adds `weight` to every candidate in `postings`, inserting candidates
    /// not seen yet.
    ///
    /// Both inputs are sorted by entry; `candidates` stays sorted. `scratch`
    /// is reused across calls to avoid reallocating per clause.
    #[inline]
    pub(crate) fn accumulate(
        candidates: &mut Vec<Candidate>,
        postings: &[Posting],
        weight: f32,
        scratch: &mut Vec<Candidate>,
    ) {
        if postings.is_empty() {
            return;
        }
        if candidates.is_empty() {
            candidates.extend(postings.iter().map(|p| Candidate {
                entry: p.entry,
                score: weight,
            }));
            return;
        }

        scratch.clear();
        scratch.reserve(candidates.len() + postings.len());

        let mut ci = 0usize;
        let mut pi = 0usize;
        while ci < candidates.len() && pi < postings.len() {
            let candidate = candidates[ci];
            let entry = postings[pi].entry;
            match candidate.entry.cmp(&entry) {
                std::cmp::Ordering::Less => {
                    scratch.push(candidate);
                    ci += 1;
                }
                std::cmp::Ordering::Greater => {
                    scratch.push(Candidate {
                        entry,
                        score: weight,
                    });
                    pi += 1;
                }
                std::cmp::Ordering::Equal => {
                    scratch.push(Candidate {
                        entry,
                        score: candidate.score + weight,
                    });
                    ci += 1;
                    pi += 1;
                }
            }
        }
        scratch.extend_from_slice(&candidates[ci..]);
        scratch.extend(postings[pi..].iter().map(|p| Candidate {
            entry: p.entry,
            score: weight,
        }));

        std::mem::swap(candidates, scratch);
    }
}
