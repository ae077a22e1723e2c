// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The small value types every layer passes around.
//!
//! Documents are identified by a dense `DocId` per segment, positions are token
//! offsets inside one node, and a `Term` pairs a field name with an analysed
//! token. Node addresses live in [`crate::node`] because they carry their own
//! ordering rules.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Type-safe document identifier, dense within one segment.
///
/// Prevents accidentally passing a token position where a document is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Create a new DocId, validating it's within bounds.
    #[inline]
    pub fn new(id: u32, num_docs: u32) -> Option<Self> {
        if id < num_docs {
            Some(DocId(id))
        } else {
            None
        }
    }

    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for array indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Shift a segment-local id into the global id space of a multi-segment searcher.
    #[inline]
    pub fn rebase(self, base: u32) -> Self {
        DocId(self.0 + base)
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl From<DocId> for usize {
    fn from(id: DocId) -> Self {
        id.0 as usize
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token offset within a single node. The first token of every node is at 0.
pub type Position = u32;

// =============================================================================
// TERMS
// =============================================================================

/// Field used when a caller does not name one.
pub const DEFAULT_FIELD: &str = "content";

/// An analysed token bound to the field it was indexed under.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Term {
    pub field: String,
    pub text: String,
}

impl Term {
    pub fn new(field: impl Into<String>, text: impl Into<String>) -> Self {
        Term {
            field: field.into(),
            text: text.into(),
        }
    }

    /// Term in [`DEFAULT_FIELD`].
    pub fn content(text: impl Into<String>) -> Self {
        Term::new(DEFAULT_FIELD, text)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.text)
    }
}
