// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

//! Newtype identifiers.
//!
//! Bare `u64`s are easy to transpose (a `streamId` passed where a
//! `brokerId` was expected compiles silently); wrapping each in its own
//! type turns that class of bug into a compile error.

use std::fmt;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(
            Copy,
            Clone,
            Default,
            Eq,
            PartialEq,
            Ord,
            PartialOrd,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(pub u64);

        impl $name {
            pub const ZERO: $name = $name(0);

            pub const fn new(v: u64) -> Self {
                $name(v)
            }

            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(StreamId);
id_newtype!(BrokerId);
id_newtype!(ObjectId);
/// A monotonically non-decreasing ownership token for a stream. `Epoch(0)`
/// is the epoch of a freshly created, never-opened stream.
id_newtype!(Epoch);
/// A byte/record offset within a single stream's logical address space.
id_newtype!(Offset);

/// A stream-local index into a stream's ordered range list.
///
/// `-1` (no range yet) is represented as `None` rather than a sentinel
/// integer, so "does this stream have a current range" is a type-level
/// question rather than a magic-number comparison scattered through the
/// codebase.
pub type RangeIndex = u64;
