// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Addressing matches inside a document's tree.
//!
//! A flat engine says "term X is at position 12 of document 7". A tree-aware
//! engine has to say *where in the tree*: which sub-record, which field, which
//! nested element. That address is a [`NodePath`], an integer sequence where
//! each component picks a child at that depth:
//!
//! ```text
//! entity
//! ├── [0]        tuple 0
//! │   ├── [0,0]  cell 0 of tuple 0
//! │   └── [0,1]  cell 1 of tuple 0
//! └── [1]        tuple 1
//!     └── [1,0]  cell 0 of tuple 1
//! ```
//!
//! Paths compare in dewey order: component by component, with an ancestor
//! sorting before all of its descendants. Every enumeration in this crate
//! emits node paths of one document in strictly increasing dewey order, which
//! is what lets the scorers merge and align streams without re-sorting.

mod range;

pub use range::{satisfies, NodeRange};

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Dewey-ordered address of a node in a document tree.
///
/// The derived `Ord` is exactly dewey order because `Vec<u32>` compares
/// lexicographically and a proper prefix sorts first.
///
/// The empty path is the root. It never addresses a match itself, but as a
/// range bound it scopes a constraint to the whole tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(Vec<u32>);

impl NodePath {
    pub fn new(ids: impl Into<Vec<u32>>) -> Self {
        NodePath(ids.into())
    }

    /// The root path (no components).
    pub const fn root() -> Self {
        NodePath(Vec::new())
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Number of components. Tuples are at depth 1, cells at depth 2.
    #[inline]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The first `depth` components, or the whole path if it is shallower.
    #[inline]
    pub fn prefix(&self, depth: usize) -> &[u32] {
        &self.0[..depth.min(self.0.len())]
    }

    /// Owned ancestor at `depth` (the path itself when already shallower).
    pub fn ancestor(&self, depth: usize) -> NodePath {
        NodePath(self.prefix(depth).to_vec())
    }

    /// Path of the `id`-th child of this node.
    pub fn child(&self, id: u32) -> NodePath {
        let mut ids = Vec::with_capacity(self.0.len() + 1);
        ids.extend_from_slice(&self.0);
        ids.push(id);
        NodePath(ids)
    }

    /// True if `self` is a proper prefix of `other`.
    pub fn is_ancestor_of(&self, other: &NodePath) -> bool {
        self.depth() < other.depth() && other.0.starts_with(&self.0)
    }

    /// Dewey comparison restricted to the components both paths share.
    ///
    /// `[1,2,3]` vs `[1,2]` is `Equal`: the shorter path is read as the
    /// ancestor range covering the longer one.
    pub fn compare_prefix(&self, other: &NodePath) -> Ordering {
        let shared = self.depth().min(other.depth());
        self.0[..shared].cmp(&other.0[..shared])
    }
}

impl From<Vec<u32>> for NodePath {
    fn from(ids: Vec<u32>) -> Self {
        NodePath(ids)
    }
}

impl From<&[u32]> for NodePath {
    fn from(ids: &[u32]) -> Self {
        NodePath(ids.to_vec())
    }
}

impl<const N: usize> From<[u32; N]> for NodePath {
    fn from(ids: [u32; N]) -> Self {
        NodePath(ids.to_vec())
    }
}

impl AsRef<[u32]> for NodePath {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", id)?;
        }
        f.write_str("]")
    }
}

/// Parses `1,0`, `[1,0]` or `[]`. Whitespace around components is ignored.
impl FromStr for NodePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let inner = s.trim();
        let inner = inner
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(inner)
            .trim();

        if inner.is_empty() {
            return Ok(NodePath::root());
        }

        inner
            .split(',')
            .map(|part| {
                part.trim().parse::<u32>().map_err(|e| {
                    Error::invalid_arg("node path", format!("'{}' in '{}': {}", part.trim(), s, e))
                })
            })
            .collect::<Result<Vec<u32>>>()
            .map(NodePath)
    }
}
