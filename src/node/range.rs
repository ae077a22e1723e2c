// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Node range constraints.
//!
//! A query like "phrase X inside the second cell of any tuple" becomes a
//! [`NodeRange`]: a lower bound, an upper bound and an optional exact depth.
//! A bound shorter than the candidate is read as an ancestor range: `[1]`
//! covers `[1]`, `[1,0]`, `[1,0,4]` and so on.
//!
//! # Rules
//!
//! 1. With a depth constraint, the candidate must have exactly that many
//!    components, whatever the bounds say.
//! 2. A bound deeper than the candidate rejects it. `[1]` is never inside
//!    `[[1,0], [1,1]]`: the candidate is an ancestor of the range, not a member.
//! 3. Otherwise the candidate's prefix must sit between the bounds' prefixes
//!    in dewey order, inclusive at both ends.
//!
//! Over candidates at least as deep as both bounds, the accepted set is one
//! contiguous dewey interval.

use std::cmp::Ordering;
use std::fmt;

use super::NodePath;
use crate::error::{Error, Result};

/// Is `path` inside `[lower, upper]`, optionally at exactly `level` components?
#[inline]
pub fn satisfies(path: &NodePath, lower: &NodePath, upper: &NodePath, level: Option<usize>) -> bool {
    if let Some(level) = level {
        if path.depth() != level {
            return false;
        }
    }

    if lower.depth() > path.depth() || upper.depth() > path.depth() {
        return false;
    }

    path.compare_prefix(lower) != Ordering::Less && path.compare_prefix(upper) != Ordering::Greater
}

/// A validated `(lower, upper, level)` constraint.
///
/// Construction rejects ranges that could never match anything sensible:
/// a lower bound ordered after the upper bound, or a bound deeper than the
/// depth constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRange {
    lower: NodePath,
    upper: NodePath,
    level: Option<usize>,
}

impl NodeRange {
    pub fn new(lower: NodePath, upper: NodePath, level: Option<usize>) -> Result<Self> {
        if let Some(level) = level {
            if lower.depth() > level || upper.depth() > level {
                return Err(Error::InvalidRange {
                    lower,
                    upper,
                    message: format!("bound is deeper than the level constraint {}", level),
                });
            }
        }

        if lower.compare_prefix(&upper) == Ordering::Greater {
            return Err(Error::InvalidRange {
                lower,
                upper,
                message: "lower bound orders after upper bound".to_string(),
            });
        }

        Ok(NodeRange { lower, upper, level })
    }

    /// Both bounds set, no depth constraint.
    pub fn between(lower: impl Into<NodePath>, upper: impl Into<NodePath>) -> Result<Self> {
        NodeRange::new(lower.into(), upper.into(), None)
    }

    /// Every node at exactly `level` components, anywhere in the tree.
    pub fn at_level(level: usize) -> Self {
        NodeRange {
            lower: NodePath::root(),
            upper: NodePath::root(),
            level: Some(level),
        }
    }

    /// Accepts every node.
    pub fn unbounded() -> Self {
        NodeRange {
            lower: NodePath::root(),
            upper: NodePath::root(),
            level: None,
        }
    }

    /// Same bounds, with an exact depth constraint added.
    pub fn with_level(self, level: usize) -> Result<Self> {
        NodeRange::new(self.lower, self.upper, Some(level))
    }

    #[inline]
    pub fn contains(&self, path: &NodePath) -> bool {
        satisfies(path, &self.lower, &self.upper, self.level)
    }

    pub fn lower(&self) -> &NodePath {
        &self.lower
    }

    pub fn upper(&self) -> &NodePath {
        &self.upper
    }

    pub fn level(&self) -> Option<usize> {
        self.level
    }
}

impl fmt::Display for NodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.lower, self.upper)?;
        if let Some(level) = self.level {
            write!(f, "@{}", level)?;
        }
        Ok(())
    }
}
