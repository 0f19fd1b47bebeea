//! TF-IDF term weighting.
//!
//! ## Algorithm
//! 1. Tokenize every document and drop stop words
//! 2. Count corpus frequency and document frequency per term
//! 3. If the vocabulary is larger than `max_features`, keep the most
//!    frequent terms (ties broken alphabetically)
//! 4. Index the surviving terms alphabetically
//! 5. Weight = raw count * idf, with smoothed idf = ln((1 + n) / (1 + df)) + 1
//! 6. L2-normalize every document vector

use crate::tokenize::{english_stop_words, tokenize_filtered};
use crate::traits::TermWeighting;
use crate::vector::{SparseVector, TermVectors};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 5000;

#[derive(Debug, Default, Clone, Copy)]
struct TermStats {
    corpus_count: usize,
    doc_count: usize,
}

/// TF-IDF vectorizer with English stop words and a vocabulary cap.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    max_features: usize,
    stop_words: HashSet<&'static str>,
}

impl TfidfVectorizer {
    /// Create a vectorizer with English stop words and a 5000 term cap
    pub fn new() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            stop_words: english_stop_words(),
        }
    }

    /// Configure the vocabulary cap (default: 5000)
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Replace the stop-word set
    pub fn with_stop_words(mut self, stop_words: HashSet<&'static str>) -> Self {
        self.stop_words = stop_words;
        self
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }

    /// Pick the vocabulary, returned in alphabetical order
    fn select_vocabulary(&self, stats: &BTreeMap<String, TermStats>) -> Vec<String> {
        if stats.len() <= self.max_features {
            return stats.keys().cloned().collect();
        }

        // BTreeMap iteration is alphabetical and the sort is stable,
        // so equal counts keep alphabetical order
        let mut by_count: Vec<(&String, usize)> = stats
            .iter()
            .map(|(term, s)| (term, s.corpus_count))
            .collect();
        by_count.sort_by(|a, b| b.1.cmp(&a.1));
        by_count.truncate(self.max_features);

        let mut vocabulary: Vec<String> = by_count.into_iter().map(|(t, _)| t.clone()).collect();
        vocabulary.sort();
        vocabulary
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TermWeighting for TfidfVectorizer {
    fn name(&self) -> &str {
        "TfidfVectorizer"
    }

    fn weigh(&self, documents: &[&str]) -> TermVectors {
        let n_docs = documents.len();

        // Per-document term counts
        let doc_counts: Vec<BTreeMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut counts = BTreeMap::new();
                for token in tokenize_filtered(doc, &self.stop_words) {
                    *counts.entry(token).or_insert(0) += 1;
                }
                counts
            })
            .collect();

        // Corpus-wide statistics
        let mut stats: BTreeMap<String, TermStats> = BTreeMap::new();
        for counts in &doc_counts {
            for (term, &count) in counts {
                let entry = stats.entry(term.clone()).or_default();
                entry.corpus_count += count;
                entry.doc_count += 1;
            }
        }

        let vocabulary = self.select_vocabulary(&stats);
        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = stats.get(term).map(|s| s.doc_count).unwrap_or(0);
                smoothed_idf(n_docs, df)
            })
            .collect();

        let vectors: Vec<SparseVector> = doc_counts
            .iter()
            .map(|counts| {
                let entries = counts
                    .iter()
                    .filter_map(|(term, &count)| {
                        let &i = index.get(term.as_str())?;
                        Some((i, count as f64 * idf[i]))
                    })
                    .collect();
                SparseVector::from_entries(entries).l2_normalized()
            })
            .collect();

        debug!(
            "{} weighted {} documents over {} terms ({} before cap)",
            self.name(),
            n_docs,
            vocabulary.len(),
            stats.len()
        );

        TermVectors {
            vocabulary,
            vectors,
        }
    }
}

/// Smoothed inverse document frequency
fn smoothed_idf(n_docs: usize, doc_freq: usize) -> f64 {
    ((1.0 + n_docs as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
}
