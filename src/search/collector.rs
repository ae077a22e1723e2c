// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Driving a scorer tree and keeping the best documents.

use log::trace;
use serde::Serialize;
use std::cmp::Ordering;

use super::NodeScorer;
use crate::contracts::check_score_finite;
use crate::error::Result;
use crate::node::NodePath;
use crate::types::DocId;

/// A confirmed match: the document, its score and the nodes that matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hit {
    pub doc: DocId,
    pub score: f32,
    pub nodes: Vec<NodePath>,
}

/// Score descending, then doc ascending.
fn rank(a: &Hit, b: &Hit) -> Ordering {
    b.score.total_cmp(&a.score).then(a.doc.cmp(&b.doc))
}

/// Document-at-a-time top-k collection.
///
/// A candidate document only counts as a hit once the scorer confirms at
/// least one node for it.
#[derive(Debug)]
pub struct TopDocsCollector {
    limit: usize,
    hits: Vec<Hit>,
    total_hits: usize,
}

impl TopDocsCollector {
    pub fn new(limit: usize) -> Self {
        TopDocsCollector {
            limit,
            hits: Vec::new(),
            total_hits: 0,
        }
    }

    /// Drain `scorer`, shifting its document ids by `doc_base`.
    pub fn collect<S>(&mut self, scorer: &mut S, doc_base: u32) -> Result<()>
    where
        S: NodeScorer + ?Sized,
    {
        while scorer.next_document()? {
            let Some(doc) = scorer.doc() else {
                break;
            };

            let mut nodes = Vec::new();
            while scorer.next_node()? {
                nodes.extend(scorer.node().cloned());
            }
            if nodes.is_empty() {
                continue;
            }

            let score = scorer.score()?;
            check_score_finite(score, doc);
            let doc = doc.rebase(doc_base);
            trace!("hit doc {} score {:.4} nodes {}", doc, score, nodes.len());

            self.total_hits += 1;
            self.push(Hit { doc, score, nodes });
        }
        Ok(())
    }

    /// Add an already-scored hit (used when merging segments).
    pub fn push(&mut self, hit: Hit) {
        if self.limit == 0 {
            return;
        }
        self.hits.push(hit);
        if self.hits.len() >= self.limit * 2 {
            self.truncate();
        }
    }

    fn truncate(&mut self) {
        self.hits.sort_by(rank);
        self.hits.truncate(self.limit);
    }

    /// Confirmed documents seen, including those that did not make the cut.
    pub fn total_hits(&self) -> usize {
        self.total_hits
    }

    pub fn into_hits(mut self) -> Vec<Hit> {
        self.truncate();
        self.hits
    }
}
