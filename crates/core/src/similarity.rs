//! Token-sequence similarity
//!
//! Cosine similarity over term-frequency vectors and Jaccard similarity
//! over token sets. Both return a value in `[0, 1]` and treat two empty
//! sequences as identical.
//!
//! Sums are accumulated as integers so both measures are exactly symmetric
//! and `x` against itself is exactly `1.0`.

use std::collections::{HashMap, HashSet};

/// Occurrence count of each distinct token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermFrequency {
    counts: HashMap<String, usize>,
}

impl TermFrequency {
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for token in tokens {
            *counts.entry(token.as_ref().to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of occurrences
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(token, count)| (token.as_str(), *count))
    }

    /// Dot product with another frequency vector
    pub fn dot(&self, other: &TermFrequency) -> u64 {
        // iterate the smaller map; only shared tokens contribute
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .iter()
            .map(|(token, count)| count as u64 * large.get(token) as u64)
            .sum()
    }

    /// Squared L2 norm
    pub fn norm_squared(&self) -> u64 {
        self.counts.values().map(|&c| (c as u64) * (c as u64)).sum()
    }

    /// L2 norm
    pub fn magnitude(&self) -> f64 {
        (self.norm_squared() as f64).sqrt()
    }
}

/// Cosine similarity of the term-frequency vectors of two token sequences.
///
/// Both empty: `1.0`. Exactly one empty: `0.0`.
pub fn cosine_similarity<S: AsRef<str>>(tokens_a: &[S], tokens_b: &[S]) -> f64 {
    let freq_a = TermFrequency::from_tokens(tokens_a);
    let freq_b = TermFrequency::from_tokens(tokens_b);

    match (freq_a.is_empty(), freq_b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let dot = freq_a.dot(&freq_b) as f64;
    let denominator = ((freq_a.norm_squared() as f64) * (freq_b.norm_squared() as f64)).sqrt();

    if denominator == 0.0 {
        return 0.0;
    }

    (dot / denominator).clamp(0.0, 1.0)
}

/// Jaccard similarity (intersection over union) of two token sets.
///
/// Both empty: `1.0`.
pub fn jaccard_similarity<S: AsRef<str>>(tokens_a: &[S], tokens_b: &[S]) -> f64 {
    let set_a: HashSet<&str> = tokens_a.iter().map(|t| t.as_ref()).collect();
    let set_b: HashSet<&str> = tokens_b.iter().map(|t| t.as_ref()).collect();

    if set_a.is_empty() && set_b.is_empty() {
        return 1.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.len() + set_b.len() - intersection;

    intersection as f64 / union as f64
}
