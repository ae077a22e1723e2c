// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query evaluation across index segments.
//!
//! Each segment gets its own scorer tree, so segments are embarrassingly
//! parallel: with the `parallel` feature, rayon runs one tree per segment and
//! the per-segment top-k lists are merged at the end. Document ids are
//! segment-local, so hits are shifted by the number of documents in the
//! segments before them.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use log::debug;

use crate::error::Result;
use crate::index::IndexReader;
use crate::query::Query;
use crate::scoring::{Similarity, TfIdfSimilarity};
use crate::search::{Hit, TopDocsCollector};

pub struct Searcher<R> {
    segments: Vec<R>,
    similarity: Box<dyn Similarity>,
}

impl<R: IndexReader> Searcher<R> {
    pub fn new(segments: Vec<R>) -> Self {
        Searcher {
            segments,
            similarity: Box::new(TfIdfSimilarity),
        }
    }

    pub fn with_similarity(mut self, similarity: impl Similarity + 'static) -> Self {
        self.similarity = Box::new(similarity);
        self
    }

    pub fn segments(&self) -> &[R] {
        &self.segments
    }

    pub fn num_docs(&self) -> u32 {
        self.segments.iter().map(|s| s.num_docs()).sum()
    }

    /// Best `limit` hits for `query`, score descending then doc ascending.
    pub fn search(&self, query: &Query, limit: usize) -> Result<Vec<Hit>> {
        let mut bases = Vec::with_capacity(self.segments.len());
        let mut base = 0u32;
        for segment in &self.segments {
            bases.push(base);
            base += segment.num_docs();
        }

        #[cfg(feature = "parallel")]
        let per_segment: Vec<Vec<Hit>> = self
            .segments
            .par_iter()
            .zip(bases.par_iter())
            .map(|(segment, &base)| self.search_segment(segment, base, query, limit))
            .collect::<Result<_>>()?;

        #[cfg(not(feature = "parallel"))]
        let per_segment: Vec<Vec<Hit>> = self
            .segments
            .iter()
            .zip(bases.iter())
            .map(|(segment, &base)| self.search_segment(segment, base, query, limit))
            .collect::<Result<_>>()?;

        let mut merged = TopDocsCollector::new(limit);
        for hit in per_segment.into_iter().flatten() {
            merged.push(hit);
        }
        let hits = merged.into_hits();
        debug!(
            "query over {} segments returned {} hits",
            self.segments.len(),
            hits.len()
        );
        Ok(hits)
    }

    fn search_segment(&self, segment: &R, base: u32, query: &Query, limit: usize) -> Result<Vec<Hit>> {
        let Some(mut scorer) = query.scorer(segment, self.similarity.as_ref())? else {
            return Ok(Vec::new());
        };
        let mut collector = TopDocsCollector::new(limit);
        collector.collect(&mut scorer, base)?;
        Ok(collector.into_hits())
    }
}
