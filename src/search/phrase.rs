// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Exact phrases within a single node.
//!
//! "given name" matches when `given` sits at position `p` and `name` at
//! `p + 1` of the *same* node. Two adjacent cells never form a phrase, even
//! if the last token of one and the first token of the next look consecutive.
//!
//! # Algorithm
//!
//! ```text
//! documents:  leapfrog until every term is on the same doc
//! nodes:      advance whichever term is furthest behind in dewey order
//! positions:  start_i = pos_i - offset_i; advance the smallest start
//!             until all starts agree → one match
//! ```
//!
//! All matches of a document are resolved when the scorer lands on it, so the
//! frequency handed to the [`DocScorer`] is the exact number of phrase
//! occurrences in the document.

use log::debug;

use super::buffer::{BufferedNode, Leapfrog, NodeBuffer};
use super::{drain_positions, NodeScorer};
use crate::error::{Error, Result};
use crate::index::DocsNodesAndPositions;
use crate::node::NodePath;
use crate::scoring::DocScorer;
use crate::types::{DocId, Position};

pub struct PhraseScorer<'a> {
    terms: Leapfrog<Box<dyn DocsNodesAndPositions + 'a>>,
    offsets: Vec<u32>,
    doc_scorer: Box<dyn DocScorer>,
    buffer: NodeBuffer,
    freq: u32,
}

impl<'a> PhraseScorer<'a> {
    /// Phrase over consecutive positions (offsets `0, 1, 2, …`).
    pub fn new(
        terms: Vec<Box<dyn DocsNodesAndPositions + 'a>>,
        doc_scorer: Box<dyn DocScorer>,
    ) -> Result<Self> {
        let offsets = (0..terms.len() as u32).collect();
        PhraseScorer::with_offsets(terms, offsets, doc_scorer)
    }

    /// Phrase where term `i` must sit at `start + offsets[i]`.
    pub fn with_offsets(
        terms: Vec<Box<dyn DocsNodesAndPositions + 'a>>,
        offsets: Vec<u32>,
        doc_scorer: Box<dyn DocScorer>,
    ) -> Result<Self> {
        if terms.len() < 2 {
            return Err(Error::invalid_arg(
                "terms",
                format!("a phrase needs at least 2 terms, got {}", terms.len()),
            ));
        }
        if offsets.len() != terms.len() {
            return Err(Error::invalid_arg(
                "offsets",
                format!("{} offsets for {} terms", offsets.len(), terms.len()),
            ));
        }
        debug!("phrase scorer over {} terms, offsets {:?}", terms.len(), offsets);
        Ok(PhraseScorer {
            terms: Leapfrog::new(terms),
            offsets,
            doc_scorer,
            buffer: NodeBuffer::default(),
            freq: 0,
        })
    }

    /// Scan forward from `found` until a document with at least one match.
    fn confirm(&mut self, mut found: Option<DocId>) -> Result<bool> {
        while found.is_some() {
            if self.collect_matches()? {
                return Ok(true);
            }
            found = self.terms.advance()?;
        }
        self.buffer.reset();
        self.freq = 0;
        Ok(false)
    }

    fn collect_matches(&mut self) -> Result<bool> {
        self.buffer.reset();
        self.freq = 0;

        for term in self.terms.children.iter_mut() {
            if !term.next_node()? {
                return Ok(false);
            }
        }

        while let Some(node) = self.align_nodes()? {
            let mut positions = Vec::with_capacity(self.terms.children.len());
            for term in self.terms.children.iter_mut() {
                positions.push(drain_positions(term)?);
            }
            let matches = align_positions(&positions, &self.offsets);
            if !matches.is_empty() {
                self.freq += matches.len() as u32;
                self.buffer.push(BufferedNode {
                    path: node,
                    freq: matches.len() as u32,
                    positions: matches,
                });
            }

            for term in self.terms.children.iter_mut() {
                if !term.next_node()? {
                    return Ok(!self.buffer.is_empty());
                }
            }
        }

        Ok(!self.buffer.is_empty())
    }

    /// Advance the lagging terms until all sit on one node.
    fn align_nodes(&mut self) -> Result<Option<NodePath>> {
        loop {
            let mut target: Option<NodePath> = None;
            for term in &self.terms.children {
                match term.node() {
                    Some(node) if target.as_ref().map_or(true, |t| node > t) => {
                        target = Some(node.clone())
                    }
                    Some(_) => {}
                    None => return Ok(None),
                }
            }
            let Some(target) = target else {
                return Ok(None);
            };

            let mut aligned = true;
            for term in self.terms.children.iter_mut() {
                if term.node().is_some_and(|n| *n < target) {
                    aligned = false;
                    if !term.skip_to_node(&target)? {
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

/// Positions of the first term at which every term lines up.
fn align_positions(positions: &[Vec<Position>], offsets: &[u32]) -> Vec<Position> {
    let mut cursors = vec![0usize; positions.len()];
    let mut matches = Vec::new();
    let start = |term: usize, cursor: usize| positions[term][cursor] as i64 - offsets[term] as i64;

    'outer: loop {
        let mut max_start = i64::MIN;
        for (term, &cursor) in cursors.iter().enumerate() {
            if cursor >= positions[term].len() {
                break 'outer;
            }
            max_start = max_start.max(start(term, cursor));
        }

        let mut aligned = true;
        for (term, cursor) in cursors.iter_mut().enumerate() {
            while start(term, *cursor) < max_start {
                *cursor += 1;
                if *cursor >= positions[term].len() {
                    break 'outer;
                }
            }
            if start(term, *cursor) != max_start {
                aligned = false;
            }
        }

        if aligned {
            matches.push(positions[0][cursors[0]]);
            for cursor in cursors.iter_mut() {
                *cursor += 1;
            }
        }
    }

    matches
}

impl DocsNodesAndPositions for PhraseScorer<'_> {
    fn next_document(&mut self) -> Result<bool> {
        let found = self.terms.advance()?;
        self.confirm(found)
    }

    fn next_node(&mut self) -> Result<bool> {
        Ok(self.buffer.next_node())
    }

    fn next_position(&mut self) -> Result<bool> {
        Ok(self.buffer.next_position())
    }

    fn skip_to(&mut self, target: DocId) -> Result<bool> {
        let found = self.terms.advance_to(target)?;
        self.confirm(found)
    }

    fn doc(&self) -> Option<DocId> {
        self.terms.doc()
    }

    fn node(&self) -> Option<&NodePath> {
        self.buffer.node()
    }

    fn pos(&self) -> Option<Position> {
        self.buffer.pos()
    }

    fn term_freq_in_doc(&self) -> u32 {
        if self.terms.doc().is_some() {
            self.freq
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

impl NodeScorer for PhraseScorer<'_> {
    fn score(&mut self) -> Result<f32> {
        let doc = self.terms.doc().ok_or(Error::Unpositioned { operation: "score" })?;
        Ok(self.doc_scorer.score(doc, self.freq as f32))
    }

    fn freq(&self) -> f32 {
        self.term_freq_in_doc() as f32
    }
}
