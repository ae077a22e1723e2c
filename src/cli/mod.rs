// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the arbor command-line interface.
//!
//! Two subcommands: `search` evaluates a query over a JSON corpus of tree
//! documents, `analyze` shows the tokens a value turns into. Both take an
//! optional analyzer config file so results match what an index built with
//! that config would see.

pub mod display;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use arbor::{NodePath, UriNormalisation};

#[derive(Parser)]
#[command(
    name = "arbor",
    about = "Tree-aware search over structured records",
    version
)]
pub struct Cli {
    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// A single term
    Term,
    /// Consecutive terms inside one node
    Phrase,
    /// Every term, meeting according to --scope
    And,
    /// Any term
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scope {
    /// Terms must meet in the same node
    Exact,
    /// Terms must meet in the same tuple
    Tuple,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a JSON corpus of tree documents
    Search {
        /// JSON file holding an array of documents ({"cells": [...]})
        corpus: PathBuf,

        /// Query terms
        #[arg(short, long, num_args = 1.., required = true)]
        terms: Vec<String>,

        /// How the terms combine
        #[arg(short, long, value_enum, default_value = "and")]
        mode: Mode,

        /// Field the terms are looked up in
        #[arg(long, default_value = arbor::DEFAULT_FIELD)]
        field: String,

        /// Lower node bound, e.g. 1,0
        #[arg(long)]
        lower: Option<NodePath>,

        /// Upper node bound, e.g. 1,1
        #[arg(long)]
        upper: Option<NodePath>,

        /// Only match nodes at exactly this depth
        #[arg(long)]
        level: Option<usize>,

        /// Where AND-ed terms have to meet
        #[arg(long, value_enum, default_value = "exact")]
        scope: Scope,

        /// Maximum number of results to return
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Analyzer config (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Split the corpus into segments of this many documents
        #[arg(long)]
        segment_size: Option<usize>,

        /// Print hits as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how a value is analysed
    Analyze {
        /// Text to analyse
        text: String,

        /// Analyse as a URI instead of free text
        #[arg(long)]
        uri: bool,

        /// URI normalisation mode (none, localname, full)
        #[arg(long)]
        normalisation: Option<UriNormalisation>,

        /// Analyzer config (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
