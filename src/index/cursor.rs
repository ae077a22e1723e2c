// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Position of a forward-only cursor within one level of a buffered stream.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Cursor {
    #[default]
    Before,
    At(usize),
    After,
}

impl Cursor {
    /// Step forward over a level with `len` entries. Returns whether the
    /// cursor is positioned afterwards.
    pub(crate) fn advance(&mut self, len: usize) -> bool {
        *self = match *self {
            Cursor::Before if len > 0 => Cursor::At(0),
            Cursor::At(i) if i + 1 < len => Cursor::At(i + 1),
            _ => Cursor::After,
        };
        matches!(self, Cursor::At(_))
    }

    pub(crate) fn index(self) -> Option<usize> {
        match self {
            Cursor::At(i) => Some(i),
            _ => None,
        }
    }
}
