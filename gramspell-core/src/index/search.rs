//! Candidate retrieval.

use crate::index::query::GramQuery;
use crate::index::types::{Candidate, GramIndex};
use gramspell_types::Hit;
use tracing::debug;

impl GramIndex {
    /// Executes `query` and returns at most `limit` hits.
    ///
    /// Hits are ordered by descending score; equal scores are ordered by
    /// ascending entry id so results are reproducible.
    #[inline(never)]
    pub fn search(&self, query: &GramQuery, limit: usize) -> Vec<Hit> {
        if self.is_empty() || limit == 0 || query.is_empty() {
            return Vec::new();
        }

        let mut candidates: Vec<Candidate> = Vec::new();
        let mut scratch: Vec<Candidate> = Vec::new();
        for clause in query.coalesced() {
            let postings = self.term_postings(clause.term);
            Self::accumulate(&mut candidates, postings, clause.weight, &mut scratch);
        }

        let mut hits: Vec<Hit> = candidates
            .iter()
            .map(|c| Hit::new(c.entry, c.score))
            .collect();

        if hits.len() > limit {
            hits.select_nth_unstable_by(limit, |a, b| b.cmp(a));
            hits.truncate(limit);
        }
        hits.sort_unstable_by(|a, b| b.cmp(a));
        hits
    }

    /// Builds the gram query for `token` and executes it.
    ///
    /// Tokens too short to yield any gram retrieve nothing.
    pub fn retrieve(
        &self,
        token: &str,
        max_candidates: usize,
        start_boost: f32,
        end_boost: f32,
    ) -> Vec<Hit> {
        let query = GramQuery::for_token(token, start_boost, end_boost);
        let hits = self.search(&query, max_candidates);
        debug!(
            token,
            clauses = query.len(),
            hits = hits.len(),
            max_candidates,
            "gram retrieval"
        );
        hits
    }
}
