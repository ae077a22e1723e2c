// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Assembling boolean clauses into a scorer tree.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{BoxedScorer, ConjunctionScorer, DisjunctionScorer, NodeScope, ReqExclScorer, ReqOptScorer};
use crate::error::{Error, Result};

/// How a clause takes part in a boolean query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occur {
    Must,
    Should,
    MustNot,
}

/// Combine clauses into one scorer.
///
/// | Clauses present            | Result                                         |
/// |----------------------------|------------------------------------------------|
/// | MUST only                  | conjunction (or the single clause)             |
/// | SHOULD only                | disjunction, which is then required            |
/// | MUST + SHOULD              | required conjunction, optional disjunction     |
/// | any + MUST_NOT             | the above, minus the excluded disjunction      |
///
/// `scope` applies to the MUST conjunction. A list with neither MUST nor
/// SHOULD clauses matches nothing sensible and is rejected.
pub fn boolean_scorer<'a>(clauses: Vec<(Occur, BoxedScorer<'a>)>, scope: NodeScope) -> Result<BoxedScorer<'a>> {
    let mut must = Vec::new();
    let mut should = Vec::new();
    let mut must_not = Vec::new();
    for (occur, scorer) in clauses {
        match occur {
            Occur::Must => must.push(scorer),
            Occur::Should => should.push(scorer),
            Occur::MustNot => must_not.push(scorer),
        }
    }

    debug!(
        "boolean scorer: {} must, {} should, {} must_not, scope {:?}",
        must.len(),
        should.len(),
        must_not.len(),
        scope
    );

    let optional = disjunction_of(should)?;
    let mut scorer = match (conjunction_of(must, scope)?, optional) {
        (Some(required), Some(optional)) => Box::new(ReqOptScorer::new(required, optional)) as BoxedScorer<'a>,
        (Some(required), None) => required,
        (None, Some(optional)) => optional,
        (None, None) => {
            return Err(Error::invalid_arg(
                "clauses",
                "a boolean query needs at least one MUST or SHOULD clause",
            ))
        }
    };

    if let Some(excluded) = disjunction_of(must_not)? {
        scorer = Box::new(ReqExclScorer::new(scorer, excluded));
    }

    Ok(scorer)
}

fn conjunction_of<'a>(mut clauses: Vec<BoxedScorer<'a>>, scope: NodeScope) -> Result<Option<BoxedScorer<'a>>> {
    match clauses.len() {
        0 => Ok(None),
        1 if scope == NodeScope::Exact => Ok(clauses.pop()),
        _ => Ok(Some(Box::new(ConjunctionScorer::new(clauses, scope)?))),
    }
}

fn disjunction_of<'a>(mut clauses: Vec<BoxedScorer<'a>>) -> Result<Option<BoxedScorer<'a>>> {
    match clauses.len() {
        0 => Ok(None),
        1 => Ok(clauses.pop()),
        _ => Ok(Some(Box::new(DisjunctionScorer::new(clauses)?))),
    }
}
