// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Crate-wide error type.
//!
//! Three families of failure, handled differently by callers:
//!
//! - **Configuration** (`InvalidRange`, `InvalidArgument`, `UnknownNormalisation`,
//!   `Config`): raised while building a scorer tree or analyzer. Nothing has
//!   been evaluated yet; fix the query or the config.
//! - **Usage** (`Unpositioned`): a caller broke the enumeration state machine,
//!   e.g. asked for a score before the first document. Fatal to the operation.
//! - **Storage** (`Storage`, `Io`): the index layer failed while reading
//!   postings. Propagated unchanged through every scorer in the tree.

use std::io;
use thiserror::Error;

use crate::node::NodePath;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid node range [{lower}, {upper}]: {message}")]
    InvalidRange {
        lower: NodePath,
        upper: NodePath,
        message: String,
    },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("unknown URI normalisation mode '{0}' (expected none, localname or full)")]
    UnknownNormalisation(String),

    #[error("{operation} called while the scorer is not positioned on a document")]
    Unpositioned { operation: &'static str },

    #[error("storage error for '{context}': {source}")]
    Storage {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {source}")]
    Config {
        #[from]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn storage(context: impl Into<String>, source: io::Error) -> Error {
        Error::Storage {
            context: context.into(),
            source,
        }
    }

    /// True for errors raised before any evaluation happened.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::InvalidRange { .. }
                | Error::InvalidArgument { .. }
                | Error::UnknownNormalisation(_)
                | Error::Config { .. }
        )
    }
}
