// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Node-range filtering over any enumeration.

use crate::error::Result;
use crate::index::DocsNodesAndPositions;
use crate::node::{NodePath, NodeRange};
use crate::search::NodeScorer;
use crate::types::{DocId, Position};

/// Wraps an enumeration and drops every node outside a [`NodeRange`].
///
/// Document advances pass straight through: the constraint only looks inside a
/// document's tree. That means a wrapped stream can report a *candidate*
/// document whose nodes all fall outside the range; `next_node` then returns
/// false right away.
///
/// Filtering a strictly increasing sequence keeps it strictly increasing, so
/// the wrapper preserves every ordering invariant of the inner stream.
pub struct ConstrainedNodes<E> {
    inner: E,
    range: NodeRange,
}

impl<E: DocsNodesAndPositions> ConstrainedNodes<E> {
    pub fn new(inner: E, range: NodeRange) -> Self {
        ConstrainedNodes { inner, range }
    }

    pub fn range(&self) -> &NodeRange {
        &self.range
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: DocsNodesAndPositions> DocsNodesAndPositions for ConstrainedNodes<E> {
    fn next_document(&mut self) -> Result<bool> {
        self.inner.next_document()
    }

    fn next_node(&mut self) -> Result<bool> {
        while self.inner.next_node()? {
            if self.inner.node().is_some_and(|node| self.range.contains(node)) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn next_position(&mut self) -> Result<bool> {
        self.inner.next_position()
    }

    fn skip_to(&mut self, target: DocId) -> Result<bool> {
        self.inner.skip_to(target)
    }

    /// Binary-searches the inner stream, then filters forward from there.
    fn skip_to_node(&mut self, target: &NodePath) -> Result<bool> {
        if !self.inner.skip_to_node(target)? {
            return Ok(false);
        }
        if self.inner.node().is_some_and(|node| self.range.contains(node)) {
            return Ok(true);
        }
        self.next_node()
    }

    fn doc(&self) -> Option<DocId> {
        self.inner.doc()
    }

    fn node(&self) -> Option<&NodePath> {
        self.inner.node()
    }

    fn pos(&self) -> Option<Position> {
        self.inner.pos()
    }

    fn term_freq_in_doc(&self) -> u32 {
        self.inner.term_freq_in_doc()
    }

    fn term_freq_in_node(&self) -> u32 {
        self.inner.term_freq_in_node()
    }

    fn node_freq_in_doc(&self) -> u32 {
        self.inner.node_freq_in_doc()
    }
}

/// A constrained scorer is still a scorer: scoring is document-level.
impl<S: NodeScorer> NodeScorer for ConstrainedNodes<S> {
    fn score(&mut self) -> Result<f32> {
        self.inner.score()
    }

    fn freq(&self) -> f32 {
        self.inner.freq()
    }
}
