// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Input records for the in-memory index.
//!
//! A document is already shaped as a tree: each cell carries the node path
//! it lives at. Turning N-Triples or JSON into cells is the caller's job.

use serde::{Deserialize, Serialize};

use crate::node::NodePath;
use crate::types::DEFAULT_FIELD;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CellValue {
    Literal(String),
    Uri(String),
}

impl CellValue {
    pub fn text(&self) -> &str {
        match self {
            CellValue::Literal(text) | CellValue::Uri(text) => text,
        }
    }
}

/// One value at one node of the tree.
///
/// ```json
/// { "node": [0, 1], "literal": "Renaud Delbru" }
/// { "node": [0, 0], "field": "subject", "uri": "<http://renaud.delbru.fr/>" }
/// ```
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub node: NodePath,
    #[serde(default = "default_field")]
    pub field: String,
    #[serde(flatten)]
    pub value: CellValue,
}

fn default_field() -> String {
    DEFAULT_FIELD.to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeDocument {
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl TreeDocument {
    pub fn new() -> Self {
        TreeDocument::default()
    }

    pub fn literal(mut self, node: impl Into<NodePath>, text: impl Into<String>) -> Self {
        self.cells.push(Cell {
            node: node.into(),
            field: default_field(),
            value: CellValue::Literal(text.into()),
        });
        self
    }

    pub fn uri(mut self, node: impl Into<NodePath>, text: impl Into<String>) -> Self {
        self.cells.push(Cell {
            node: node.into(),
            field: default_field(),
            value: CellValue::Uri(text.into()),
        });
        self
    }

    /// Add a cell under a named field.
    pub fn cell(mut self, node: impl Into<NodePath>, field: impl Into<String>, value: CellValue) -> Self {
        self.cells.push(Cell {
            node: node.into(),
            field: field.into(),
            value,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
