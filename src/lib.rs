// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tree-aware query evaluation for structured records.
//!
//! Flat inverted indexes answer "which documents contain X, and where in the
//! token stream". Records like RDF entities or JSON objects have structure
//! that matters to the query: "the phrase *given name* in a cell of the same
//! tuple as *Renaud*". This crate addresses every match by its node in the
//! document tree and lets queries constrain, combine and score at any level
//! of that tree.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐    ┌──────────────┐    ┌───────────────┐    ┌────────────┐
//! │  analysis   │───▶│ index::memory│───▶│ search scorers│───▶│ collector  │
//! │ (URI, text) │    │ (IndexReader)│    │ (term, phrase,│    │ (top-k)    │
//! └─────────────┘    └──────────────┘    │  boolean)     │    └────────────┘
//!                           │            └───────────────┘          ▲
//!                           ▼                    ▲                  │
//!                    ┌──────────────┐    ┌───────────────┐    ┌────────────┐
//!                    │ node::range  │───▶│ Constrained-  │    │ searcher   │
//!                    │ (satisfies)  │    │ Nodes         │    │ (segments) │
//!                    └──────────────┘    └───────────────┘    └────────────┘
//! ```
//!
//! Everything above the storage layer speaks one protocol,
//! [`DocsNodesAndPositions`]: documents, then nodes within a document, then
//! positions within a node, all strictly increasing.
//!
//! # Usage
//!
//! ```
//! use arbor::{AnalyzerConfig, MemoryIndex, Occur, Query, Searcher, TreeDocument};
//!
//! let docs = vec![
//!     TreeDocument::new()
//!         .uri([0, 0], "<http://xmlns.com/foaf/0.1/name>")
//!         .literal([0, 1], "Renaud Delbru"),
//! ];
//! let index = MemoryIndex::from_documents(&docs, AnalyzerConfig::default());
//!
//! let query = Query::tuple(vec![
//!     (Occur::Must, Query::cell(Query::phrase(["renaud", "delbru"]))),
//! ]);
//! let hits = Searcher::new(vec![index]).search(&query, 10).unwrap();
//! assert_eq!(hits.len(), 1);
//! ```

pub mod analysis;
pub mod contracts;
mod error;
pub mod index;
pub mod node;
pub mod query;
pub mod scoring;
pub mod search;
mod searcher;
pub mod testing;
mod types;
mod utils;

pub use analysis::{Analyzer, AnalyzerConfig, LiteralAnalyzer, Token, TokenType, UriAnalyzer, UriNormalisation};
pub use error::{Error, Result};
pub use index::{
    Cell, CellValue, ConstrainedNodes, DocsNodesAndPositions, IndexReader, MemoryIndex,
    MemoryIndexBuilder, MemoryPostings, TreeDocument,
};
pub use node::{satisfies, NodePath, NodeRange};
pub use query::Query;
pub use scoring::{DocScorer, Similarity, TfIdfSimilarity};
pub use search::{
    boolean_scorer, BoxedScorer, ConjunctionScorer, DisjunctionScorer, Hit, NodeScope, NodeScorer,
    Occur, PhraseScorer, ReqExclScorer, ReqOptScorer, TermScorer, TopDocsCollector,
};
pub use searcher::Searcher;
pub use types::{DocId, Position, Term, DEFAULT_FIELD};
pub use utils::{normalize, percent_decode};
