// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structured queries and their translation into scorer trees.
//!
//! ```text
//! Query::tuple([                               ConjunctionScorer (tuple)
//!     (Must, Query::cell(Query::phrase(..))),  ├── ConstrainedNodes (level 2)
//!     (Must, Query::term("renaud")),           │   └── PhraseScorer
//! ])                                           └── TermScorer
//! ```
//!
//! A query is plain data and can be evaluated against any number of
//! segments; [`Query::scorer`] binds it to one segment's postings.

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::index::{ConstrainedNodes, IndexReader};
use crate::node::NodeRange;
use crate::scoring::Similarity;
use crate::search::{boolean_scorer, BoxedScorer, NodeScope, Occur, PhraseScorer, TermScorer};
use crate::types::Term;

/// Depth of cells (fields of a tuple) in a document tree.
pub const CELL_LEVEL: usize = 2;

/// Depth of tuples in a document tree.
pub const TUPLE_LEVEL: usize = 1;

#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Term(Term),
    /// Consecutive terms inside one node.
    Phrase(Vec<Term>),
    Boolean {
        clauses: Vec<(Occur, Query)>,
        scope: NodeScope,
    },
    Constrained {
        query: Box<Query>,
        range: NodeRange,
    },
}

impl Query {
    /// Term in the default field.
    pub fn term(text: impl Into<String>) -> Query {
        Query::Term(Term::content(text))
    }

    pub fn phrase<I, S>(words: I) -> Query
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Query::Phrase(words.into_iter().map(Term::content).collect())
    }

    /// Boolean query whose MUST clauses meet at the same node.
    pub fn boolean(clauses: Vec<(Occur, Query)>) -> Query {
        Query::Boolean {
            clauses,
            scope: NodeScope::Exact,
        }
    }

    /// Boolean query whose MUST clauses only have to meet in the same tuple.
    pub fn tuple(clauses: Vec<(Occur, Query)>) -> Query {
        Query::Boolean {
            clauses,
            scope: NodeScope::Ancestor { depth: TUPLE_LEVEL },
        }
    }

    /// Restrict `query` to cell nodes.
    pub fn cell(query: Query) -> Query {
        Query::constrained(query, NodeRange::at_level(CELL_LEVEL))
    }

    pub fn constrained(query: Query, range: NodeRange) -> Query {
        Query::Constrained {
            query: Box::new(query),
            range,
        }
    }

    /// Bind this query to one segment.
    ///
    /// Returns `Ok(None)` when the segment cannot match: a required term (or
    /// every optional one) is missing from it. Malformed queries fail with a
    /// configuration error.
    pub fn scorer<'a>(
        &self,
        reader: &'a dyn IndexReader,
        similarity: &dyn Similarity,
    ) -> Result<Option<BoxedScorer<'a>>> {
        match self {
            Query::Term(term) => {
                let Some(postings) = reader.postings(term)? else {
                    warn!("term {} not found in segment", term);
                    return Ok(None);
                };
                let doc_scorer = similarity.term_scorer(reader, term, 1.0);
                Ok(Some(Box::new(TermScorer::new(postings, doc_scorer)) as BoxedScorer<'a>))
            }

            Query::Phrase(terms) => match terms.as_slice() {
                [] => Err(Error::invalid_arg("phrase", "a phrase needs at least one term")),
                [term] => Query::Term(term.clone()).scorer(reader, similarity),
                _ => {
                    let mut postings = Vec::with_capacity(terms.len());
                    for term in terms {
                        let Some(p) = reader.postings(term)? else {
                            warn!("phrase term {} not found in segment", term);
                            return Ok(None);
                        };
                        postings.push(p);
                    }
                    let doc_scorer = similarity.phrase_scorer(reader, terms, 1.0);
                    Ok(Some(Box::new(PhraseScorer::new(postings, doc_scorer)?) as BoxedScorer<'a>))
                }
            },

            Query::Boolean { clauses, scope } => {
                let has_positive = clauses.iter().any(|(occur, _)| *occur != Occur::MustNot);
                if !has_positive {
                    return Err(Error::invalid_arg(
                        "clauses",
                        "a boolean query needs at least one MUST or SHOULD clause",
                    ));
                }

                let mut scorers = Vec::with_capacity(clauses.len());
                for (occur, query) in clauses {
                    match (query.scorer(reader, similarity)?, occur) {
                        (Some(scorer), _) => scorers.push((*occur, scorer)),
                        (None, Occur::Must) => return Ok(None),
                        (None, _) => {}
                    }
                }
                if !scorers.iter().any(|(occur, _)| *occur != Occur::MustNot) {
                    debug!("no positive clause matches this segment");
                    return Ok(None);
                }
                boolean_scorer(scorers, *scope).map(Some)
            }

            Query::Constrained { query, range } => Ok(query
                .scorer(reader, similarity)?
                .map(|inner| Box::new(ConstrainedNodes::new(inner, range.clone())) as BoxedScorer<'a>)),
        }
    }
}
