//! Full-text index over the card catalog.
//!
//! Built once per loaded catalog and never mutated. Name and edition fields
//! are tokenized literally: no stemming and no stop-word elimination, so a
//! query for "twinn" still finds "Twinning Blade".
//!
//! Queries use a small wildcard syntax: `*term*` matches any token containing
//! `term`, `term*` a token starting with it, `*term` one ending with it, and
//! a bare `term` matches a token exactly. Terms are combined with AND
//! semantics. User input is turned into this syntax by [`build_query`].

use crate::models::CardRecord;

/// Maximum number of hits a user query returns.
pub const MAX_RESULTS: usize = 20;

/// Score for a term matching an indexed token exactly. Partial matches score
/// below 1.0, scaled by how much of the token the term covers.
const EXACT_MATCH_SCORE: f32 = 2.0;

/// A ranked match referencing a catalog card id.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: String,
    pub score: f32,
}

struct IndexedCard {
    id: String,
    tokens: Vec<String>,
}

/// Build the wildcard query string for raw user input: trim, split on
/// whitespace, wrap every token in `*`, rejoin with single spaces.
///
/// `"twinning blade"` becomes `"*twinning* *blade*"`.
pub fn build_query(input: &str) -> String {
    input
        .trim()
        .split_whitespace()
        .map(|token| format!("*{}*", token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase and split a field on whitespace and hyphens.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// How a query term is allowed to match an indexed token.
struct QueryTerm {
    literal: String,
    match_start: bool,
    match_end: bool,
}

impl QueryTerm {
    fn parse(term: &str) -> Option<Self> {
        let match_end = term.starts_with('*');
        let match_start = term.ends_with('*');
        let literal = term.trim_matches('*').to_lowercase();
        if literal.is_empty() {
            return None;
        }
        Some(Self {
            literal,
            match_start,
            match_end,
        })
    }

    /// Score of this term against one token; `None` when it does not match.
    fn score_against(&self, token: &str) -> Option<f32> {
        if *token == self.literal {
            return Some(EXACT_MATCH_SCORE);
        }
        let matches = match (self.match_end, self.match_start) {
            (true, true) => token.contains(&self.literal),
            (false, true) => token.starts_with(&self.literal),
            (true, false) => token.ends_with(&self.literal),
            (false, false) => false,
        };
        if matches {
            // Partial match: weight by how much of the token is covered
            Some(self.literal.len() as f32 / token.len() as f32)
        } else {
            None
        }
    }
}

pub struct CatalogIndex {
    docs: Vec<IndexedCard>,
}

impl CatalogIndex {
    /// Build the index over the full record list. An empty list yields a
    /// valid index for which every query returns nothing.
    pub fn build(records: &[CardRecord]) -> Self {
        let docs = records
            .iter()
            .map(|card| {
                let mut tokens = tokenize(&card.name);
                tokens.extend(tokenize(&card.edition));
                IndexedCard {
                    id: card.id.clone(),
                    tokens,
                }
            })
            .collect();
        Self { docs }
    }

    /// Answer a raw user query: empty or whitespace-only input returns no
    /// hits without touching the index; anything else is wrapped by
    /// [`build_query`] and ranked, capped at [`MAX_RESULTS`].
    pub fn query(&self, input: &str) -> Vec<SearchHit> {
        if input.trim().is_empty() {
            return Vec::new();
        }
        let mut hits = self.search(&build_query(input));
        hits.truncate(MAX_RESULTS);
        hits
    }

    /// Ranked search in the wildcard query syntax. Every term must match at
    /// least one token of a card for the card to hit. Hits are ordered by
    /// descending score, ties broken by catalog id for determinism.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let terms: Vec<QueryTerm> = query.split_whitespace().filter_map(QueryTerm::parse).collect();
        if terms.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit> = self
            .docs
            .iter()
            .filter_map(|doc| {
                let mut score = 0.0;
                for term in &terms {
                    // Best-matching token decides the term's contribution;
                    // a term matching nothing disqualifies the card
                    let best = doc
                        .tokens
                        .iter()
                        .filter_map(|token| term.score_against(token))
                        .max_by(f32::total_cmp)?;
                    score += best;
                }
                Some(SearchHit {
                    id: doc.id.clone(),
                    score,
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        hits
    }
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
