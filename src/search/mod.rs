// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scorers: match sources that also know how much a match is worth.
//!
//! A query becomes a tree of scorers mirroring its structure:
//!
//! ```text
//! ReqExclScorer
//! ├── ConjunctionScorer (scope: tuple)
//! │   ├── TermScorer "renaud"
//! │   └── ConstrainedNodes (cells only)
//! │       └── PhraseScorer "given name"
//! └── TermScorer "draft"
//! ```
//!
//! Every node of the tree speaks [`DocsNodesAndPositions`], so any scorer can
//! be wrapped, constrained or combined with any other. The root is driven
//! document-at-a-time by a [`TopDocsCollector`].
//!
//! # Node-level matching
//!
//! Flat engines combine at document granularity. Here a conjunction only
//! matches where its children meet at the same node (or the same ancestor,
//! see [`NodeScope`]), and an exclusion only removes the nodes the excluded
//! clause hits. Composite scorers therefore resolve the nodes of a document
//! as soon as they land on it, and never report a document in which no node
//! survived.

mod boolean;
mod buffer;
mod collector;
mod conjunction;
mod disjunction;
mod phrase;
mod req_excl;
mod req_opt;
mod term;

pub use boolean::{boolean_scorer, Occur};
pub use collector::{Hit, TopDocsCollector};
pub use conjunction::ConjunctionScorer;
pub use disjunction::DisjunctionScorer;
pub use phrase::PhraseScorer;
pub use req_excl::ReqExclScorer;
pub use req_opt::ReqOptScorer;
pub use term::TermScorer;

use crate::contracts::check_position_advance;
use crate::error::Result;
use crate::index::DocsNodesAndPositions;
use crate::node::NodePath;
use crate::types::{DocId, Position};

/// A match source with a document-level score.
pub trait NodeScorer: DocsNodesAndPositions {
    /// Score of the current document.
    ///
    /// Fails with [`Error::Unpositioned`](crate::Error::Unpositioned) before
    /// the first document and after exhaustion.
    fn score(&mut self) -> Result<f32>;

    /// Frequency the score was computed from; 0 when unpositioned.
    fn freq(&self) -> f32;
}

impl<T: NodeScorer + ?Sized> NodeScorer for Box<T> {
    fn score(&mut self) -> Result<f32> {
        (**self).score()
    }

    fn freq(&self) -> f32 {
        (**self).freq()
    }
}

/// Scorer trees are assembled at runtime from query data.
pub type BoxedScorer<'a> = Box<dyn NodeScorer + 'a>;

/// Where the children of a conjunction have to meet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NodeScope {
    /// All children at the very same node.
    #[default]
    Exact,
    /// All children under the same ancestor, truncated to `depth` components.
    /// `depth: 1` means "somewhere in the same tuple".
    Ancestor { depth: usize },
}

impl NodeScope {
    /// The node a child at `path` is grouped under.
    #[inline]
    pub fn key(&self, path: &NodePath) -> NodePath {
        match self {
            NodeScope::Exact => path.clone(),
            NodeScope::Ancestor { depth } => path.ancestor(*depth),
        }
    }
}

/// Drain the remaining positions of the current node.
pub(crate) fn drain_positions<E>(source: &mut E) -> Result<Vec<Position>>
where
    E: DocsNodesAndPositions + ?Sized,
{
    let mut positions: Vec<Position> = Vec::with_capacity(source.term_freq_in_node() as usize);
    while source.next_position()? {
        if let Some(pos) = source.pos() {
            check_position_advance(positions.last().copied(), pos);
            positions.push(pos);
        }
    }
    Ok(positions)
}

/// Move `source` onto `doc` unless it already sits there or beyond.
///
/// Returns whether `source` is now on exactly `doc`. Sources ahead of `doc`
/// are left alone, so this never skips a document they have not reported yet.
pub(crate) fn advance_to_doc<E>(source: &mut E, doc: DocId) -> Result<bool>
where
    E: DocsNodesAndPositions + ?Sized,
{
    match source.doc() {
        Some(current) if current >= doc => Ok(current == doc),
        _ => Ok(source.skip_to(doc)? && source.doc() == Some(doc)),
    }
}
