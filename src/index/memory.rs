// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Immutable in-memory index segment.
//!
//! # Layout
//!
//! ```text
//! Term → PostingList
//!          └─ DocEntry  { doc, freq }            sorted by doc
//!               └─ NodeEntry { path }            sorted in dewey order
//!                    └─ positions + token types  sorted, first token at 0
//! ```
//!
//! Posting lists sit behind `Arc`, so handing out a [`MemoryPostings`]
//! cursor costs one reference-count bump and many scorer trees can read the
//! same segment concurrently.

use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::cursor::Cursor;
use super::{DocsNodesAndPositions, IndexReader, TreeDocument};
use crate::analysis::{Analyzer, AnalyzerConfig, LiteralAnalyzer, TokenType, UriAnalyzer};
use crate::contracts::check_strictly_increasing;
use crate::error::Result;
use crate::index::CellValue;
use crate::node::NodePath;
use crate::types::{DocId, Position, Term};

#[derive(Debug, Clone)]
struct NodeEntry {
    path: NodePath,
    positions: Vec<Position>,
    types: Vec<TokenType>,
}

#[derive(Debug, Clone)]
struct DocEntry {
    doc: DocId,
    nodes: Vec<NodeEntry>,
    freq: u32,
}

#[derive(Debug, Default)]
struct PostingList {
    docs: Vec<DocEntry>,
}

impl PostingList {
    fn check_well_formed(&self) {
        let docs: Vec<DocId> = self.docs.iter().map(|d| d.doc).collect();
        check_strictly_increasing(&docs, "posting documents");
        for entry in &self.docs {
            let paths: Vec<&NodePath> = entry.nodes.iter().map(|n| &n.path).collect();
            check_strictly_increasing(&paths, "posting nodes");
            for node in &entry.nodes {
                check_strictly_increasing(&node.positions, "posting positions");
            }
        }
    }
}

// =============================================================================
// INDEX
// =============================================================================

/// A frozen segment. Build one with [`MemoryIndexBuilder`].
#[derive(Debug, Default)]
pub struct MemoryIndex {
    num_docs: u32,
    postings: HashMap<Term, Arc<PostingList>>,
}

impl MemoryIndex {
    /// Index `docs` with consecutive ids starting at 0.
    pub fn from_documents<'d>(
        docs: impl IntoIterator<Item = &'d TreeDocument>,
        config: AnalyzerConfig,
    ) -> Self {
        let mut builder = MemoryIndexBuilder::new(config);
        for doc in docs {
            builder.add_document(doc);
        }
        builder.build()
    }

    pub fn num_terms(&self) -> usize {
        self.postings.len()
    }

    /// Concrete cursor for `term`, with access to token types.
    pub fn memory_postings(&self, term: &Term) -> Option<MemoryPostings> {
        self.postings.get(term).cloned().map(MemoryPostings::new)
    }

    /// All indexed terms, in no particular order.
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.postings.keys()
    }
}

impl IndexReader for MemoryIndex {
    fn num_docs(&self) -> u32 {
        self.num_docs
    }

    fn doc_freq(&self, term: &Term) -> u32 {
        self.postings.get(term).map_or(0, |list| list.docs.len() as u32)
    }

    fn postings(&self, term: &Term) -> Result<Option<Box<dyn DocsNodesAndPositions + '_>>> {
        Ok(self
            .memory_postings(term)
            .map(|p| Box::new(p) as Box<dyn DocsNodesAndPositions>))
    }
}

// =============================================================================
// BUILDER
// =============================================================================

type DocTerms = HashMap<Term, BTreeMap<NodePath, Vec<(Position, TokenType)>>>;

/// Analyses [`TreeDocument`]s and accumulates postings.
///
/// Several cells may share a node and field; their tokens are laid out one
/// after the other, so positions keep increasing across cells.
pub struct MemoryIndexBuilder {
    literal: LiteralAnalyzer,
    uri: UriAnalyzer,
    num_docs: u32,
    postings: HashMap<Term, Vec<DocEntry>>,
}

impl MemoryIndexBuilder {
    pub fn new(config: AnalyzerConfig) -> Self {
        MemoryIndexBuilder {
            literal: LiteralAnalyzer::new(config.clone()),
            uri: UriAnalyzer::new(config),
            num_docs: 0,
            postings: HashMap::new(),
        }
    }

    /// Analyse and add one document. Returns the id it was given.
    pub fn add_document(&mut self, document: &TreeDocument) -> DocId {
        let doc = DocId(self.num_docs);
        self.num_docs += 1;

        let mut terms: DocTerms = HashMap::new();
        let mut next_pos: HashMap<(&str, &NodePath), Position> = HashMap::new();

        for cell in &document.cells {
            let tokens = match &cell.value {
                CellValue::Literal(text) => self.literal.analyze(text),
                CellValue::Uri(text) => self.uri.analyze(text),
            };
            let base = next_pos.entry((cell.field.as_str(), &cell.node)).or_insert(0);
            let start = *base;
            for token in &tokens {
                terms
                    .entry(Term::new(cell.field.as_str(), token.text.as_str()))
                    .or_default()
                    .entry(cell.node.clone())
                    .or_default()
                    .push((start + token.position, token.token_type));
            }
            if let Some(last) = tokens.last() {
                *base = start + last.position + 1;
            }
        }

        for (term, nodes) in terms {
            let mut freq = 0;
            let nodes = nodes
                .into_iter()
                .map(|(path, mut hits)| {
                    hits.sort_by_key(|(pos, _)| *pos);
                    hits.dedup_by_key(|(pos, _)| *pos);
                    freq += hits.len() as u32;
                    let (positions, types) = hits.into_iter().unzip();
                    NodeEntry { path, positions, types }
                })
                .collect();
            self.postings.entry(term).or_default().push(DocEntry { doc, nodes, freq });
        }

        doc
    }

    pub fn num_docs(&self) -> u32 {
        self.num_docs
    }

    pub fn build(self) -> MemoryIndex {
        let postings: HashMap<Term, Arc<PostingList>> = self
            .postings
            .into_iter()
            .map(|(term, docs)| {
                let list = PostingList { docs };
                list.check_well_formed();
                (term, Arc::new(list))
            })
            .collect();

        debug!(
            "froze in-memory index: {} documents, {} terms",
            self.num_docs,
            postings.len()
        );

        MemoryIndex {
            num_docs: self.num_docs,
            postings,
        }
    }
}

// =============================================================================
// CURSOR
// =============================================================================

/// Three-level cursor over one term's posting list.
#[derive(Debug, Clone)]
pub struct MemoryPostings {
    list: Arc<PostingList>,
    doc: Cursor,
    node: Cursor,
    pos: Cursor,
}

impl MemoryPostings {
    fn new(list: Arc<PostingList>) -> Self {
        MemoryPostings {
            list,
            doc: Cursor::Before,
            node: Cursor::Before,
            pos: Cursor::Before,
        }
    }

    /// Build a posting stream straight from `(doc, node, positions)` triples.
    ///
    /// Input order does not matter; triples for the same doc and node are
    /// merged. Every position is tagged [`TokenType::Literal`].
    pub fn from_triples(triples: Vec<(u32, Vec<u32>, Vec<Position>)>) -> Self {
        let mut grouped: BTreeMap<u32, BTreeMap<NodePath, Vec<Position>>> = BTreeMap::new();
        for (doc, node, positions) in triples {
            grouped
                .entry(doc)
                .or_default()
                .entry(NodePath::from(node))
                .or_default()
                .extend(positions);
        }

        let docs = grouped
            .into_iter()
            .map(|(doc, nodes)| {
                let mut freq = 0;
                let nodes = nodes
                    .into_iter()
                    .map(|(path, mut positions)| {
                        positions.sort_unstable();
                        positions.dedup();
                        freq += positions.len() as u32;
                        let types = vec![TokenType::Literal; positions.len()];
                        NodeEntry { path, positions, types }
                    })
                    .collect();
                DocEntry {
                    doc: DocId(doc),
                    nodes,
                    freq,
                }
            })
            .collect();

        let list = PostingList { docs };
        list.check_well_formed();
        MemoryPostings::new(Arc::new(list))
    }

    fn doc_entry(&self) -> Option<&DocEntry> {
        self.doc.index().map(|i| &self.list.docs[i])
    }

    fn node_entry(&self) -> Option<&NodeEntry> {
        let doc = self.doc_entry()?;
        self.node.index().map(|i| &doc.nodes[i])
    }

    /// Token type recorded at the current position.
    pub fn token_type(&self) -> Option<TokenType> {
        let node = self.node_entry()?;
        self.pos.index().map(|i| node.types[i])
    }

    /// Documents in the whole list.
    pub fn len(&self) -> usize {
        self.list.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.docs.is_empty()
    }

    fn reset_inner_levels(&mut self) {
        self.node = Cursor::Before;
        self.pos = Cursor::Before;
    }
}

impl DocsNodesAndPositions for MemoryPostings {
    fn next_document(&mut self) -> Result<bool> {
        self.reset_inner_levels();
        Ok(self.doc.advance(self.list.docs.len()))
    }

    fn next_node(&mut self) -> Result<bool> {
        let Some(len) = self.doc_entry().map(|d| d.nodes.len()) else {
            return Ok(false);
        };
        self.pos = Cursor::Before;
        Ok(self.node.advance(len))
    }

    fn next_position(&mut self) -> Result<bool> {
        let Some(len) = self.node_entry().map(|n| n.positions.len()) else {
            return Ok(false);
        };
        Ok(self.pos.advance(len))
    }

    fn skip_to(&mut self, target: DocId) -> Result<bool> {
        self.reset_inner_levels();
        let start = match self.doc {
            Cursor::Before => 0,
            Cursor::At(i) => i + 1,
            Cursor::After => return Ok(false),
        };
        let docs = &self.list.docs;
        let found = start + docs[start..].partition_point(|entry| entry.doc < target);
        self.doc = if found < docs.len() {
            Cursor::At(found)
        } else {
            Cursor::After
        };
        Ok(matches!(self.doc, Cursor::At(_)))
    }

    fn skip_to_node(&mut self, target: &NodePath) -> Result<bool> {
        let Some(doc) = self.doc.index() else {
            return Ok(false);
        };
        let nodes = &self.list.docs[doc].nodes;
        let start = match self.node {
            Cursor::Before => 0,
            Cursor::At(i) if nodes[i].path >= *target => return Ok(true),
            Cursor::At(i) => i + 1,
            Cursor::After => return Ok(false),
        };
        let found = start + nodes[start..].partition_point(|entry| entry.path < *target);
        self.node = if found < nodes.len() {
            Cursor::At(found)
        } else {
            Cursor::After
        };
        self.pos = Cursor::Before;
        Ok(matches!(self.node, Cursor::At(_)))
    }

    fn doc(&self) -> Option<DocId> {
        self.doc_entry().map(|d| d.doc)
    }

    fn node(&self) -> Option<&NodePath> {
        self.node_entry().map(|n| &n.path)
    }

    fn pos(&self) -> Option<Position> {
        let node = self.node_entry()?;
        self.pos.index().map(|i| node.positions[i])
    }

    fn term_freq_in_doc(&self) -> u32 {
        self.doc_entry().map_or(0, |d| d.freq)
    }

    fn term_freq_in_node(&self) -> u32 {
        self.node_entry().map_or(0, |n| n.positions.len() as u32)
    }

    fn node_freq_in_doc(&self) -> u32 {
        self.doc_entry().map_or(0, |d| d.nodes.len() as u32)
    }
}
