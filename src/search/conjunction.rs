// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Node-aware conjunction.

use log::debug;

use super::buffer::{normalize_positions, BufferedNode, Leapfrog, NodeBuffer};
use super::{drain_positions, BoxedScorer, NodeScope, NodeScorer};
use crate::error::{Error, Result};
use crate::index::DocsNodesAndPositions;
use crate::node::NodePath;
use crate::types::{DocId, Position};

/// All children must match, and must meet inside the tree.
///
/// With [`NodeScope::Exact`] the children have to hit the very same node and
/// the reported positions are the union of theirs. With
/// [`NodeScope::Ancestor`] they only have to share an ancestor; the reported
/// node is that ancestor and no positions are exposed.
///
/// A document where the children co-occur but never meet is skipped.
pub struct ConjunctionScorer<'a> {
    children: Leapfrog<BoxedScorer<'a>>,
    scope: NodeScope,
    buffer: NodeBuffer,
}

impl<'a> ConjunctionScorer<'a> {
    pub fn new(children: Vec<BoxedScorer<'a>>, scope: NodeScope) -> Result<Self> {
        if children.is_empty() {
            return Err(Error::invalid_arg("children", "a conjunction needs at least one clause"));
        }
        debug!("conjunction over {} clauses, scope {:?}", children.len(), scope);
        Ok(ConjunctionScorer {
            children: Leapfrog::new(children),
            scope,
            buffer: NodeBuffer::default(),
        })
    }

    pub fn scope(&self) -> NodeScope {
        self.scope
    }

    fn confirm(&mut self, mut found: Option<DocId>) -> Result<bool> {
        while found.is_some() {
            if self.collect_nodes()? {
                return Ok(true);
            }
            found = self.children.advance()?;
        }
        self.buffer.reset();
        Ok(false)
    }

    fn key(&self, child: usize) -> Option<NodePath> {
        self.children.children[child].node().map(|n| self.scope.key(n))
    }

    fn collect_nodes(&mut self) -> Result<bool> {
        self.buffer.reset();

        for child in self.children.children.iter_mut() {
            if !child.next_node()? {
                return Ok(false);
            }
        }

        while let Some(key) = self.align_nodes()? {
            let (node, exhausted) = match self.scope {
                NodeScope::Exact => self.take_exact(key)?,
                NodeScope::Ancestor { .. } => self.take_ancestor(key)?,
            };
            self.buffer.push(node);
            if exhausted {
                break;
            }
        }

        Ok(!self.buffer.is_empty())
    }

    /// Consume the shared node. Returns the match and whether a child ran out.
    fn take_exact(&mut self, key: NodePath) -> Result<(BufferedNode, bool)> {
        let mut positions: Vec<Position> = Vec::new();
        let mut freq = 0;
        for child in self.children.children.iter_mut() {
            freq += child.term_freq_in_node();
            positions.extend(drain_positions(child)?);
        }
        normalize_positions(&mut positions);

        let mut exhausted = false;
        for child in self.children.children.iter_mut() {
            if !child.next_node()? {
                exhausted = true;
                break;
            }
        }

        Ok((
            BufferedNode {
                path: key,
                positions,
                freq,
            },
            exhausted,
        ))
    }

    /// Consume every node under the shared ancestor.
    fn take_ancestor(&mut self, key: NodePath) -> Result<(BufferedNode, bool)> {
        let mut freq = 0;
        let mut exhausted = false;
        for i in 0..self.children.children.len() {
            loop {
                freq += self.children.children[i].term_freq_in_node();
                if !self.children.children[i].next_node()? {
                    exhausted = true;
                    break;
                }
                if self.key(i).as_ref() != Some(&key) {
                    break;
                }
            }
        }

        Ok((
            BufferedNode {
                path: key,
                positions: Vec::new(),
                freq,
            },
            exhausted,
        ))
    }

    /// Advance lagging children until every key agrees.
    fn align_nodes(&mut self) -> Result<Option<NodePath>> {
        let count = self.children.children.len();
        loop {
            let mut target: Option<NodePath> = None;
            for i in 0..count {
                match self.key(i) {
                    Some(key) if target.as_ref().map_or(true, |t| key > *t) => target = Some(key),
                    Some(_) => {}
                    None => return Ok(None),
                }
            }
            let Some(target) = target else {
                return Ok(None);
            };

            let mut aligned = true;
            // A node sorts at or after its ancestor key, so skipping to the
            // key lands on the first node grouped under it or later.
            for i in 0..count {
                if self.key(i).is_some_and(|k| k < target) {
                    aligned = false;
                    if !self.children.children[i].skip_to_node(&target)? {
                        return Ok(None);
                    }
                }
            }
            if aligned {
                return Ok(Some(target));
            }
        }
    }
}

impl DocsNodesAndPositions for ConjunctionScorer<'_> {
    fn next_document(&mut self) -> Result<bool> {
        let found = self.children.advance()?;
        self.confirm(found)
    }

    fn next_node(&mut self) -> Result<bool> {
        Ok(self.buffer.next_node())
    }

    fn next_position(&mut self) -> Result<bool> {
        Ok(self.buffer.next_position())
    }

    fn skip_to(&mut self, target: DocId) -> Result<bool> {
        let found = self.children.advance_to(target)?;
        self.confirm(found)
    }

    fn doc(&self) -> Option<DocId> {
        self.children.doc()
    }

    fn node(&self) -> Option<&NodePath> {
        self.buffer.node()
    }

    fn pos(&self) -> Option<Position> {
        self.buffer.pos()
    }

    fn term_freq_in_doc(&self) -> u32 {
        if self.children.doc().is_none() {
            return 0;
        }
        self.children.children.iter().map(|c| c.term_freq_in_doc()).sum()
    }

    fn term_freq_in_node(&self) -> u32 {
        self.buffer.freq_in_node()
    }

    fn node_freq_in_doc(&self) -> u32 {
        self.buffer.node_count()
    }
}

impl NodeScorer for ConjunctionScorer<'_> {
    fn score(&mut self) -> Result<f32> {
        if self.children.doc().is_none() {
            return Err(Error::Unpositioned { operation: "score" });
        }
        let mut score = 0.0;
        for child in self.children.children.iter_mut() {
            score += child.score()?;
        }
        Ok(score)
    }

    fn freq(&self) -> f32 {
        if self.children.doc().is_none() {
            return 0.0;
        }
        self.children.children.iter().map(|c| c.freq()).sum()
    }
}
