// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use std::io;

use crate::error::{Error, Result};
use crate::index::{DocsNodesAndPositions, MemoryPostings, TreeDocument};
use crate::node::NodePath;
use crate::scoring::DocScorer;
use crate::search::{BoxedScorer, NodeScorer, TermScorer};
use crate::types::{DocId, Position};

/// `(doc, node path, positions)` as accepted by [`MemoryPostings::from_triples`].
pub type Triple = (u32, Vec<u32>, Vec<Position>);

/// Shorthand for a node path.
pub fn node(ids: &[u32]) -> NodePath {
    NodePath::from(ids)
}

pub fn postings(triples: Vec<Triple>) -> MemoryPostings {
    MemoryPostings::from_triples(triples)
}

/// A doc scorer whose score is the raw frequency.
pub fn freq_scorer() -> Box<dyn DocScorer> {
    Box::new(|_doc: DocId, freq: f32| freq)
}

/// Term scorer over literal triples, scoring by frequency.
pub fn term_scorer(triples: Vec<Triple>) -> BoxedScorer<'static> {
    Box::new(TermScorer::new(postings(triples), freq_scorer()))
}

/// Build a document from tuples of cell values.
///
/// Tuple `i`, cell `j` lands at node `[i, j]`. Values wrapped in `<…>` are
/// indexed as URIs, everything else as literals.
pub fn tuples_doc(tuples: &[&[&str]]) -> TreeDocument {
    let mut doc = TreeDocument::new();
    for (i, cells) in tuples.iter().enumerate() {
        for (j, value) in cells.iter().enumerate() {
            let path = [i as u32, j as u32];
            doc = if value.starts_with('<') && value.ends_with('>') {
                doc.uri(path, *value)
            } else {
                doc.literal(path, *value)
            };
        }
    }
    doc
}

/// Drain an enumeration into `(doc, nodes)` pairs, including candidate
/// documents without nodes.
pub fn drain_docs<E>(source: &mut E) -> Result<Vec<(DocId, Vec<NodePath>)>>
where
    E: DocsNodesAndPositions + ?Sized,
{
    let mut out = Vec::new();
    while source.next_document()? {
        let Some(doc) = source.doc() else {
            break;
        };
        let mut nodes = Vec::new();
        while source.next_node()? {
            nodes.extend(source.node().cloned());
        }
        out.push((doc, nodes));
    }
    Ok(out)
}

/// Drain the positions of every node of the current document.
pub fn drain_nodes<E>(source: &mut E) -> Result<Vec<(NodePath, Vec<Position>)>>
where
    E: DocsNodesAndPositions + ?Sized,
{
    let mut out = Vec::new();
    while source.next_node()? {
        let Some(path) = source.node().cloned() else {
            break;
        };
        let mut positions = Vec::new();
        while source.next_position()? {
            positions.extend(source.pos());
        }
        out.push((path, positions));
    }
    Ok(out)
}

/// Postings that fail with a storage error once they reach `fail_at`.
pub struct FailingPostings {
    inner: MemoryPostings,
    fail_at: DocId,
}

impl FailingPostings {
    pub fn new(triples: Vec<Triple>, fail_at: DocId) -> Self {
        FailingPostings {
            inner: postings(triples),
            fail_at,
        }
    }

    fn check(&self, moved: bool) -> Result<bool> {
        match self.inner.doc() {
            Some(doc) if moved && doc >= self.fail_at => Err(Error::storage(
                format!("postings block for doc {}", doc),
                io::Error::new(io::ErrorKind::UnexpectedEof, "truncated posting block"),
            )),
            _ => Ok(moved),
        }
    }
}

impl DocsNodesAndPositions for FailingPostings {
    fn next_document(&mut self) -> Result<bool> {
        let moved = self.inner.next_document()?;
        self.check(moved)
    }

    fn next_node(&mut self) -> Result<bool> {
        self.inner.next_node()
    }

    fn next_position(&mut self) -> Result<bool> {
        self.inner.next_position()
    }

    fn skip_to(&mut self, target: DocId) -> Result<bool> {
        let moved = self.inner.skip_to(target)?;
        self.check(moved)
    }

    fn skip_to_node(&mut self, target: &NodePath) -> Result<bool> {
        self.inner.skip_to_node(target)
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

/// Term scorer over [`FailingPostings`].
pub fn failing_scorer(triples: Vec<Triple>, fail_at: DocId) -> BoxedScorer<'static> {
    Box::new(TermScorer::new(FailingPostings::new(triples, fail_at), freq_scorer()))
}

/// Score every document of a scorer, in order.
pub fn scores<S: NodeScorer + ?Sized>(scorer: &mut S) -> Result<Vec<(DocId, f32)>> {
    let mut out = Vec::new();
    while scorer.next_document()? {
        if let Some(doc) = scorer.doc() {
            out.push((doc, scorer.score()?));
        }
    }
    Ok(out)
}
