// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring functions: how a match gets its number.
//!
//! Scorers in [`crate::search`] only know *how often* something matched in
//! a document. Turning that frequency into a score is delegated to a
//! [`DocScorer`], which a [`Similarity`] builds once per term or phrase from
//! segment statistics.
//!
//! # Default formula
//!
//! ```text
//! idf(t)   = 1 + ln(num_docs / (doc_freq(t) + 1))
//! score    = sqrt(freq) · idf² · boost
//! idf(phrase) = Σ idf(t) over the phrase terms
//! ```
//!
//! This is the classic Lucene vector-space weighting without norms: nodes are
//! short, so length normalisation adds little.

use crate::index::IndexReader;
use crate::types::{DocId, Term};

/// Maps `(document, frequency)` to a score.
pub trait DocScorer: Send + Sync {
    fn score(&self, doc: DocId, freq: f32) -> f32;
}

impl<F> DocScorer for F
where
    F: Fn(DocId, f32) -> f32 + Send + Sync,
{
    fn score(&self, doc: DocId, freq: f32) -> f32 {
        self(doc, freq)
    }
}

/// Builds [`DocScorer`]s from collection statistics.
pub trait Similarity: Send + Sync {
    fn term_scorer(&self, reader: &dyn IndexReader, term: &Term, boost: f32) -> Box<dyn DocScorer>;

    fn phrase_scorer(&self, reader: &dyn IndexReader, terms: &[Term], boost: f32) -> Box<dyn DocScorer>;
}

/// Inverse document frequency.
#[inline]
pub fn idf(doc_freq: u32, num_docs: u32) -> f32 {
    let ratio = num_docs.max(1) as f64 / (doc_freq as f64 + 1.0);
    (1.0 + ratio.ln()) as f32
}

/// TF-IDF weighting, the default similarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfSimilarity;

impl Similarity for TfIdfSimilarity {
    fn term_scorer(&self, reader: &dyn IndexReader, term: &Term, boost: f32) -> Box<dyn DocScorer> {
        let idf = idf(reader.doc_freq(term), reader.num_docs());
        Box::new(TfIdfScorer::new(idf, boost))
    }

    fn phrase_scorer(&self, reader: &dyn IndexReader, terms: &[Term], boost: f32) -> Box<dyn DocScorer> {
        let num_docs = reader.num_docs();
        let idf = terms.iter().map(|t| idf(reader.doc_freq(t), num_docs)).sum();
        Box::new(TfIdfScorer::new(idf, boost))
    }
}

#[derive(Debug, Clone, Copy)]
struct TfIdfScorer {
    weight: f32,
}

impl TfIdfScorer {
    fn new(idf: f32, boost: f32) -> Self {
        TfIdfScorer {
            weight: idf * idf * boost,
        }
    }
}

impl DocScorer for TfIdfScorer {
    #[inline]
    fn score(&self, _doc: DocId, freq: f32) -> f32 {
        freq.sqrt() * self.weight
    }
}
