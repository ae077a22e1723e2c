// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The three-level enumeration protocol and the storage-layer contract.
//!
//! Every match source in the crate, from a raw posting list up to a boolean
//! combination, walks the same nested levels:
//!
//! ```text
//! next_document()            doc 0          doc 3          doc 9
//!   next_node()              ├─ [0,0]       ├─ [1,2]       └─ ...
//!     next_position()        │   ├─ 0       │   └─ 4
//!                            │   └─ 3       └─ ...
//!                            └─ [1,0]
//!                                └─ 1
//! ```
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **DOCS_INCREASING**: documents come out in strictly increasing id order.
//! 2. **NODES_INCREASING**: within a document, node paths are strictly
//!    increasing in dewey order.
//! 3. **POSITIONS_INCREASING**: within a node, positions are strictly increasing.
//! 4. **TERMINAL_EXHAUSTION**: once `next_document` (or `skip_to`) returns
//!    false it keeps returning false; `next_node` after node exhaustion keeps
//!    returning false until the next document advance.
//!
//! Phrase alignment, node-scoped conjunction and constraint filtering all lean
//! on these orderings instead of sorting anything.

mod constrained;
pub(crate) mod cursor;
mod document;
mod memory;

pub use constrained::ConstrainedNodes;
pub use document::{Cell, CellValue, TreeDocument};
pub use memory::{MemoryIndex, MemoryIndexBuilder, MemoryPostings};

use crate::error::Result;
use crate::node::NodePath;
use crate::types::{DocId, Position, Term};

/// Document → node → position enumeration.
///
/// Accessors return `None` whenever the corresponding level is not positioned:
/// before its first successful advance, and after it is exhausted.
pub trait DocsNodesAndPositions {
    /// Advance to the next candidate document. Resets node and position state.
    fn next_document(&mut self) -> Result<bool>;

    /// Advance to the next matching node of the current document.
    fn next_node(&mut self) -> Result<bool>;

    /// Advance to the next position of the current node.
    fn next_position(&mut self) -> Result<bool>;

    /// Advance to the first candidate document `>= target`.
    ///
    /// Never moves backward: if the current document already satisfies the
    /// target, this behaves like `next_document`.
    fn skip_to(&mut self, target: DocId) -> Result<bool>;

    /// Advance within the current document to the first node `>= target`.
    ///
    /// Stays put (positions untouched) if the current node already satisfies
    /// the target. Returns false once the document has no such node, leaving
    /// the node level exhausted. The default walks `next_node`; posting lists
    /// override it with a binary search.
    fn skip_to_node(&mut self, target: &NodePath) -> Result<bool> {
        if self.node().is_some_and(|node| node >= target) {
            return Ok(true);
        }
        while self.next_node()? {
            if self.node().is_some_and(|node| node >= target) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn doc(&self) -> Option<DocId>;

    fn node(&self) -> Option<&NodePath>;

    fn pos(&self) -> Option<Position>;

    /// Occurrences in the current document, 0 when unpositioned.
    fn term_freq_in_doc(&self) -> u32;

    /// Occurrences in the current node, 0 when unpositioned.
    fn term_freq_in_node(&self) -> u32;

    /// Matching nodes in the current document, 0 when unpositioned.
    fn node_freq_in_doc(&self) -> u32;
}

impl<T: DocsNodesAndPositions + ?Sized> DocsNodesAndPositions for Box<T> {
    fn next_document(&mut self) -> Result<bool> {
        (**self).next_document()
    }

    fn next_node(&mut self) -> Result<bool> {
        (**self).next_node()
    }

    fn next_position(&mut self) -> Result<bool> {
        (**self).next_position()
    }

    fn skip_to(&mut self, target: DocId) -> Result<bool> {
        (**self).skip_to(target)
    }

    fn skip_to_node(&mut self, target: &NodePath) -> Result<bool> {
        (**self).skip_to_node(target)
    }

    fn doc(&self) -> Option<DocId> {
        (**self).doc()
    }

    fn node(&self) -> Option<&NodePath> {
        (**self).node()
    }

    fn pos(&self) -> Option<Position> {
        (**self).pos()
    }

    fn term_freq_in_doc(&self) -> u32 {
        (**self).term_freq_in_doc()
    }

    fn term_freq_in_node(&self) -> u32 {
        (**self).term_freq_in_node()
    }

    fn node_freq_in_doc(&self) -> u32 {
        (**self).node_freq_in_doc()
    }
}

/// Read-only view of one index segment, as supplied by the storage layer.
///
/// Implementations must give concurrent readers a consistent snapshot: many
/// scorer trees may hold postings from the same reader at once.
pub trait IndexReader: Send + Sync {
    /// Number of documents in the segment (dense ids `0..num_docs`).
    fn num_docs(&self) -> u32;

    /// Number of documents containing `term`.
    fn doc_freq(&self, term: &Term) -> u32;

    /// Posting stream for `term`, or `None` if the segment never saw it.
    fn postings(&self, term: &Term) -> Result<Option<Box<dyn DocsNodesAndPositions + '_>>>;
}
