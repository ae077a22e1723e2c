// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Required clause minus a prohibited one, at node granularity.

use super::buffer::{BufferedNode, NodeBuffer};
use super::{advance_to_doc, drain_positions, BoxedScorer, NodeScorer};
use crate::error::{Error, Result};
use crate::index::DocsNodesAndPositions;
use crate::node::NodePath;
use crate::types::{DocId, Position};

/// Drops every required node the excluded scorer also hits.
///
/// Exclusion is per node, not per document: `renaud -draft` still matches a
/// document with "renaud" in one cell and "draft" in another. A document is
/// reported only if at least one required node survives.
pub struct ReqExclScorer<'a> {
    required: BoxedScorer<'a>,
    excluded: BoxedScorer<'a>,
    buffer: NodeBuffer,
    positioned: bool,
}

impl<'a> ReqExclScorer<'a> {
    pub fn new(required: BoxedScorer<'a>, excluded: BoxedScorer<'a>) -> Self {
        ReqExclScorer {
            required,
            excluded,
            buffer: NodeBuffer::default(),
            positioned: false,
        }
    }

    /// Scan forward from the required scorer's document until one keeps a node.
    fn confirm(&mut self, mut found: bool) -> Result<bool> {
        while found {
            if self.collect()? {
                self.positioned = true;
                return Ok(true);
            }
            found = self.required.next_document()?;
        }
        self.buffer.reset();
        self.positioned = false;
        Ok(false)
    }

    fn collect(&mut self) -> Result<bool> {
        self.buffer.reset();
        let Some(doc) = self.required.doc() else {
            return Ok(false);
        };

        let excl_on_doc = advance_to_doc(&mut self.excluded, doc)?;
        let mut excl_live = excl_on_doc && self.excluded.next_node()?;

        while self.required.next_node()? {
            let Some(path) = self.required.node().cloned() else {
                break;
            };
            if excl_live && self.excluded.node().is_some_and(|n| *n < path) {
                excl_live = self.excluded.skip_to_node(&path)?;
            }
            if excl_live && self.excluded.node() == Some(&path) {
                continue;
            }

            let freq = self.required.term_freq_in_node();
            let positions = drain_positions(&mut self.required)?;
            self.buffer.push(BufferedNode {
                path,
                positions,
                freq,
            });
        }

        Ok(!self.buffer.is_empty())
    }
}

impl DocsNodesAndPositions for ReqExclScorer<'_> {
    fn next_document(&mut self) -> Result<bool> {
        let found = self.required.next_document()?;
        self.confirm(found)
    }

    fn next_node(&mut self) -> Result<bool> {
        Ok(self.buffer.next_node())
    }

    fn next_position(&mut self) -> Result<bool> {
        Ok(self.buffer.next_position())
    }

    fn skip_to(&mut self, target: DocId) -> Result<bool> {
        let found = self.required.skip_to(target)?;
        self.confirm(found)
    }

    fn doc(&self) -> Option<DocId> {
        self.required.doc().filter(|_| self.positioned)
    }

    fn node(&self) -> Option<&NodePath> {
        self.buffer.node()
    }

    fn pos(&self) -> Option<Position> {
        self.buffer.pos()
    }

    fn term_freq_in_doc(&self) -> u32 {
        if self.positioned {
            self.buffer.total_freq()
        } else {
            0
        }
    }

    fn term_freq_in_node(&self) -> u32 {
        self.buffer.freq_in_node()
    }

    fn node_freq_in_doc(&self) -> u32 {
        self.buffer.node_count()
    }
}

impl NodeScorer for ReqExclScorer<'_> {
    fn score(&mut self) -> Result<f32> {
        if !self.positioned {
            return Err(Error::Unpositioned { operation: "score" });
        }
        self.required.score()
    }

    fn freq(&self) -> f32 {
        if self.positioned {
            self.required.freq()
        } else {
            0.0
        }
    }
}
