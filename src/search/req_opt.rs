// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Required clause plus an optional one that only adds score.

use super::buffer::{normalize_positions, BufferedNode, NodeBuffer};
use super::{advance_to_doc, drain_positions, BoxedScorer, NodeScorer};
use crate::error::{Error, Result};
use crate::index::DocsNodesAndPositions;
use crate::node::NodePath;
use crate::types::{DocId, Position};

/// Matches exactly what the required scorer matches.
///
/// When the optional scorer is on the same document it adds its score; when
/// it is on the same node it also contributes positions. The optional side is
/// only advanced lazily, to the document the required side is on.
pub struct ReqOptScorer<'a> {
    required: BoxedScorer<'a>,
    optional: BoxedScorer<'a>,
    opt_on_doc: bool,
    buffer: NodeBuffer,
}

impl<'a> ReqOptScorer<'a> {
    pub fn new(required: BoxedScorer<'a>, optional: BoxedScorer<'a>) -> Self {
        ReqOptScorer {
            required,
            optional,
            opt_on_doc: false,
            buffer: NodeBuffer::default(),
        }
    }

    fn collect(&mut self, found: bool) -> Result<bool> {
        self.buffer.reset();
        self.opt_on_doc = false;
        let Some(doc) = self.required.doc().filter(|_| found) else {
            return Ok(false);
        };

        self.opt_on_doc = advance_to_doc(&mut self.optional, doc)?;
        let mut opt_live = self.opt_on_doc && self.optional.next_node()?;

        while self.required.next_node()? {
            let Some(path) = self.required.node().cloned() else {
                break;
            };
            let mut freq = self.required.term_freq_in_node();
            let mut positions = drain_positions(&mut self.required)?;

            if opt_live && self.optional.node().is_some_and(|n| *n < path) {
                opt_live = self.optional.skip_to_node(&path)?;
            }
            if opt_live && self.optional.node() == Some(&path) {
                freq += self.optional.term_freq_in_node();
                positions.extend(drain_positions(&mut self.optional)?);
                normalize_positions(&mut positions);
            }

            self.buffer.push(BufferedNode {
                path,
                positions,
                freq,
            });
        }

        Ok(true)
    }
}

impl DocsNodesAndPositions for ReqOptScorer<'_> {
    fn next_document(&mut self) -> Result<bool> {
        let found = self.required.next_document()?;
        self.collect(found)
    }

    fn next_node(&mut self) -> Result<bool> {
        Ok(self.buffer.next_node())
    }

    fn next_position(&mut self) -> Result<bool> {
        Ok(self.buffer.next_position())
    }

    fn skip_to(&mut self, target: DocId) -> Result<bool> {
        let found = self.required.skip_to(target)?;
        self.collect(found)
    }

    fn doc(&self) -> Option<DocId> {
        self.required.doc()
    }

    fn node(&self) -> Option<&NodePath> {
        self.buffer.node()
    }

    fn pos(&self) -> Option<Position> {
        self.buffer.pos()
    }

    fn term_freq_in_doc(&self) -> u32 {
        let optional = if self.opt_on_doc {
            self.optional.term_freq_in_doc()
        } else {
            0
        };
        self.required.term_freq_in_doc() + optional
    }

    fn term_freq_in_node(&self) -> u32 {
        self.buffer.freq_in_node()
    }

    fn node_freq_in_doc(&self) -> u32 {
        self.buffer.node_count()
    }
}

impl NodeScorer for ReqOptScorer<'_> {
    fn score(&mut self) -> Result<f32> {
        if self.required.doc().is_none() {
            return Err(Error::Unpositioned { operation: "score" });
        }
        let mut score = self.required.score()?;
        if self.opt_on_doc {
            score += self.optional.score()?;
        }
        Ok(score)
    }

    fn freq(&self) -> f32 {
        let optional = if self.opt_on_doc { self.optional.freq() } else { 0.0 };
        self.required.freq() + optional
    }
}
