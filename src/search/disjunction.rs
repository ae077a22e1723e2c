// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Node-aware disjunction.

use log::debug;
use std::collections::BTreeMap;

use super::buffer::{normalize_positions, BufferedNode, NodeBuffer};
use super::{drain_positions, BoxedScorer, NodeScorer};
use crate::contracts::check_doc_advance;
use crate::error::{Error, Result};
use crate::index::DocsNodesAndPositions;
use crate::node::NodePath;
use crate::types::{DocId, Position};

/// Any child may match.
///
/// The current document is the smallest one any child is on. Its nodes are
/// the dewey-ordered union of the children's nodes there, with positions
/// merged per node.
pub struct DisjunctionScorer<'a> {
    children: Vec<BoxedScorer<'a>>,
    started: bool,
    doc: Option<DocId>,
    buffer: NodeBuffer,
    doc_freq: u32,
}

impl<'a> DisjunctionScorer<'a> {
    pub fn new(children: Vec<BoxedScorer<'a>>) -> Result<Self> {
        if children.is_empty() {
            return Err(Error::invalid_arg("children", "a disjunction needs at least one clause"));
        }
        debug!("disjunction over {} clauses", children.len());
        Ok(DisjunctionScorer {
            children,
            started: false,
            doc: None,
            buffer: NodeBuffer::default(),
            doc_freq: 0,
        })
    }

    fn on_doc(&self, child: &BoxedScorer<'a>) -> bool {
        self.doc.is_some() && child.doc() == self.doc
    }

    /// Pick the smallest child document with at least one node.
    fn settle(&mut self) -> Result<bool> {
        loop {
            let Some(min) = self.children.iter().filter_map(|c| c.doc()).min() else {
                self.doc = None;
                self.buffer.reset();
                self.doc_freq = 0;
                return Ok(false);
            };

            let mut merged: BTreeMap<NodePath, (Vec<Position>, u32)> = BTreeMap::new();
            let mut doc_freq = 0;
            for child in self.children.iter_mut().filter(|c| c.doc() == Some(min)) {
                doc_freq += child.term_freq_in_doc();
                while child.next_node()? {
                    let Some(path) = child.node().cloned() else {
                        break;
                    };
                    let freq = child.term_freq_in_node();
                    let positions = drain_positions(child)?;
                    let entry = merged.entry(path).or_default();
                    entry.0.extend(positions);
                    entry.1 += freq;
                }
            }

            if merged.is_empty() {
                for child in self.children.iter_mut().filter(|c| c.doc() == Some(min)) {
                    child.next_document()?;
                }
                continue;
            }

            self.buffer.reset();
            for (path, (mut positions, freq)) in merged {
                normalize_positions(&mut positions);
                self.buffer.push(BufferedNode {
                    path,
                    positions,
                    freq,
                });
            }
            check_doc_advance(self.doc, min);
            self.doc = Some(min);
            self.doc_freq = doc_freq;
            return Ok(true);
        }
    }
}

impl DocsNodesAndPositions for DisjunctionScorer<'_> {
    fn next_document(&mut self) -> Result<bool> {
        if !self.started {
            self.started = true;
            for child in self.children.iter_mut() {
                child.next_document()?;
            }
        } else if let Some(doc) = self.doc {
            for child in self.children.iter_mut().filter(|c| c.doc() == Some(doc)) {
                child.next_document()?;
            }
        } else {
            return Ok(false);
        }
        self.settle()
    }

    fn next_node(&mut self) -> Result<bool> {
        Ok(self.buffer.next_node())
    }

    fn next_position(&mut self) -> Result<bool> {
        Ok(self.buffer.next_position())
    }

    fn skip_to(&mut self, target: DocId) -> Result<bool> {
        if self.doc.is_some_and(|d| d >= target) {
            return self.next_document();
        }
        if self.started && self.doc.is_none() {
            return Ok(false);
        }
        self.started = true;
        for child in self.children.iter_mut() {
            if child.doc().map_or(true, |d| d < target) {
                child.skip_to(target)?;
            }
        }
        self.settle()
    }

    fn doc(&self) -> Option<DocId> {
        self.doc
    }

    fn node(&self) -> Option<&NodePath> {
        self.buffer.node()
    }

    fn pos(&self) -> Option<Position> {
        self.buffer.pos()
    }

    fn term_freq_in_doc(&self) -> u32 {
        self.doc_freq
    }

    fn term_freq_in_node(&self) -> u32 {
        self.buffer.freq_in_node()
    }

    fn node_freq_in_doc(&self) -> u32 {
        self.buffer.node_count()
    }
}

impl NodeScorer for DisjunctionScorer<'_> {
    fn score(&mut self) -> Result<f32> {
        let doc = self.doc.ok_or(Error::Unpositioned { operation: "score" })?;
        let mut score = 0.0;
        for child in self.children.iter_mut().filter(|c| c.doc() == Some(doc)) {
            score += child.score()?;
        }
        Ok(score)
    }

    fn freq(&self) -> f32 {
        self.children
            .iter()
            .filter(|c| self.on_doc(c))
            .map(|c| c.freq())
            .sum()
    }
}
