// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Leaf scorer over one term's postings.

use super::NodeScorer;
use crate::error::{Error, Result};
use crate::index::DocsNodesAndPositions;
use crate::node::NodePath;
use crate::scoring::DocScorer;
use crate::types::{DocId, Position};

/// Adapts a posting stream to [`NodeScorer`].
///
/// Navigation is a straight pass-through. The score of a document is the
/// injected [`DocScorer`] applied to `(doc, term frequency in doc)`.
pub struct TermScorer<P> {
    postings: P,
    doc_scorer: Box<dyn DocScorer>,
}

impl<P: DocsNodesAndPositions> TermScorer<P> {
    pub fn new(postings: P, doc_scorer: Box<dyn DocScorer>) -> Self {
        TermScorer {
            postings,
            doc_scorer,
        }
    }

    pub fn postings(&self) -> &P {
        &self.postings
    }
}

impl<P: DocsNodesAndPositions> DocsNodesAndPositions for TermScorer<P> {
    fn next_document(&mut self) -> Result<bool> {
        self.postings.next_document()
    }

    fn next_node(&mut self) -> Result<bool> {
        self.postings.next_node()
    }

    fn next_position(&mut self) -> Result<bool> {
        self.postings.next_position()
    }

    fn skip_to(&mut self, target: DocId) -> Result<bool> {
        self.postings.skip_to(target)
    }

    fn skip_to_node(&mut self, target: &NodePath) -> Result<bool> {
        self.postings.skip_to_node(target)
    }

    fn doc(&self) -> Option<DocId> {
        self.postings.doc()
    }

    fn node(&self) -> Option<&NodePath> {
        self.postings.node()
    }

    fn pos(&self) -> Option<Position> {
        self.postings.pos()
    }

    fn term_freq_in_doc(&self) -> u32 {
        self.postings.term_freq_in_doc()
    }

    fn term_freq_in_node(&self) -> u32 {
        self.postings.term_freq_in_node()
    }

    fn node_freq_in_doc(&self) -> u32 {
        self.postings.node_freq_in_doc()
    }
}

impl<P: DocsNodesAndPositions> NodeScorer for TermScorer<P> {
    fn score(&mut self) -> Result<f32> {
        let doc = self
            .postings
            .doc()
            .ok_or(Error::Unpositioned { operation: "score" })?;
        Ok(self.doc_scorer.score(doc, self.freq()))
    }

    fn freq(&self) -> f32 {
        self.postings.term_freq_in_doc() as f32
    }
}
