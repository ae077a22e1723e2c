// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-document state shared by the composite scorers.

use crate::contracts::{check_doc_advance, check_node_advance};
use crate::error::Result;
use crate::index::cursor::Cursor;
use crate::index::DocsNodesAndPositions;
use crate::node::NodePath;
use crate::types::{DocId, Position};

/// One resolved node of the current document.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BufferedNode {
    pub path: NodePath,
    pub positions: Vec<Position>,
    pub freq: u32,
}

/// The resolved nodes of one document, replayed through the node and
/// position levels of the protocol.
#[derive(Debug, Default)]
pub(crate) struct NodeBuffer {
    nodes: Vec<BufferedNode>,
    node: Cursor,
    pos: Cursor,
}

impl NodeBuffer {
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.node = Cursor::Before;
        self.pos = Cursor::Before;
    }

    pub fn push(&mut self, node: BufferedNode) {
        check_node_advance(self.nodes.last().map(|n| &n.path), &node.path);
        self.nodes.push(node);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn next_node(&mut self) -> bool {
        self.pos = Cursor::Before;
        self.node.advance(self.nodes.len())
    }

    pub fn next_position(&mut self) -> bool {
        match self.current() {
            Some(node) => {
                let len = node.positions.len();
                self.pos.advance(len)
            }
            None => false,
        }
    }

    fn current(&self) -> Option<&BufferedNode> {
        self.node.index().map(|i| &self.nodes[i])
    }

    pub fn node(&self) -> Option<&NodePath> {
        self.current().map(|n| &n.path)
    }

    pub fn pos(&self) -> Option<Position> {
        let node = self.current()?;
        self.pos.index().map(|i| node.positions[i])
    }

    pub fn freq_in_node(&self) -> u32 {
        self.current().map_or(0, |n| n.freq)
    }

    pub fn node_count(&self) -> u32 {
        self.nodes.len() as u32
    }

    pub fn total_freq(&self) -> u32 {
        self.nodes.iter().map(|n| n.freq).sum()
    }
}

/// Sort and deduplicate merged positions.
pub(crate) fn normalize_positions(positions: &mut Vec<Position>) {
    positions.sort_unstable();
    positions.dedup();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeapState {
    Unstarted,
    Active,
    Exhausted,
}

/// Leapfrog over children until they all sit on the same document.
///
/// The first child leads: advancing means moving the lead, then skipping
/// every child that lags behind the furthest one until all agree.
pub(crate) struct Leapfrog<T> {
    pub children: Vec<T>,
    state: LeapState,
    doc: Option<DocId>,
}

impl<T: DocsNodesAndPositions> Leapfrog<T> {
    pub fn new(children: Vec<T>) -> Self {
        Leapfrog {
            children,
            state: LeapState::Unstarted,
            doc: None,
        }
    }

    pub fn doc(&self) -> Option<DocId> {
        self.doc
    }

    /// Next document every child is on.
    pub fn advance(&mut self) -> Result<Option<DocId>> {
        let moved = match self.state {
            LeapState::Exhausted => false,
            LeapState::Unstarted => {
                self.state = LeapState::Active;
                let mut all = true;
                for child in self.children.iter_mut() {
                    all &= child.next_document()?;
                }
                all
            }
            LeapState::Active => match self.children.first_mut() {
                Some(lead) => lead.next_document()?,
                None => false,
            },
        };
        self.settle(moved)
    }

    /// First document `>= target` every child is on.
    pub fn advance_to(&mut self, target: DocId) -> Result<Option<DocId>> {
        let moved = match self.state {
            LeapState::Exhausted => false,
            LeapState::Unstarted => {
                self.state = LeapState::Active;
                let mut all = true;
                for child in self.children.iter_mut() {
                    all &= child.skip_to(target)?;
                }
                all
            }
            LeapState::Active => match self.children.first_mut() {
                Some(lead) if lead.doc().is_some_and(|d| d >= target) => lead.next_document()?,
                Some(lead) => lead.skip_to(target)?,
                None => false,
            },
        };
        self.settle(moved)
    }

    fn settle(&mut self, moved: bool) -> Result<Option<DocId>> {
        let aligned = if moved { self.align()? } else { None };
        match aligned {
            Some(doc) => {
                check_doc_advance(self.doc, doc);
                self.doc = Some(doc);
            }
            None => {
                self.state = LeapState::Exhausted;
                self.doc = None;
            }
        }
        Ok(aligned)
    }

    fn align(&mut self) -> Result<Option<DocId>> {
        loop {
            let mut target = None;
            for child in &self.children {
                match child.doc() {
                    Some(doc) => target = target.max(Some(doc)),
                    None => return Ok(None),
                }
            }
            let Some(target) = target else {
                return Ok(None);
            };

            let mut aligned = true;
            for child in self.children.iter_mut() {
                if child.doc().is_some_and(|d| d < target) {
                    aligned = false;
                    if !child.skip_to(target)? {
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
