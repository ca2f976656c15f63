// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

//! The narrow, synchronous interface to the shared-object lifecycle
//! manager — the only non-log collaborator the core uses. Kept
//! deliberately thin: it never shares mutable state with the manager, only
//! hands back records to append atomically with the caller's own.

use crate::ids::ObjectId;
use crate::records::Record;

/// Result of asking the object collaborator to commit an object.
pub struct CommitOutcome {
    /// Records the collaborator wants appended alongside the WAL commit.
    pub records: Vec<Record>,
    /// `true` if this object had already been committed previously (the
    /// commit is idempotent); `false` if this is a brand new commit.
    pub existed: bool,
}

/// Confirms shared-object existence/commit state for [`crate::commit`].
///
/// Implementations must be synchronous and side-effect-free with respect
/// to the stream control manager's own state: this is called from inside
/// a single-threaded operation and must not block on I/O.
pub trait ObjectCollaborator {
    /// Attempts to commit `object_id` (of `object_size` bytes).
    ///
    /// Returns `None` if the object was never prepared (unknown to the
    /// collaborator). Otherwise returns `Some(outcome)`.
    fn commit_object(&mut self, object_id: ObjectId, object_size: u64) -> Option<CommitOutcome>;
}

/// An object collaborator that has never heard of any object. Useful for
/// exercising the `OBJECT_NOT_EXIST` path in tests.
#[derive(Default)]
pub struct NeverPreparedObjects;

impl ObjectCollaborator for NeverPreparedObjects {
    fn commit_object(&mut self, _object_id: ObjectId, _object_size: u64) -> Option<CommitOutcome> {
        None
    }
}

/// An in-memory stand-in for the real shared-object lifecycle manager.
/// Objects must be `prepare`d before they can be committed, mirroring an
/// uncommitted object that was previously prepared in the object store.
#[derive(Default)]
pub struct FakeObjectStore {
    prepared: base::FastHashSet<ObjectId>,
    committed: base::FastHashSet<ObjectId>,
}

impl FakeObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `object_id` as having been created in the object store,
    /// but not yet committed as a WAL object.
    pub fn prepare(&mut self, object_id: ObjectId) {
        self.prepared.insert(object_id);
    }
}

impl ObjectCollaborator for FakeObjectStore {
    fn commit_object(&mut self, object_id: ObjectId, _object_size: u64) -> Option<CommitOutcome> {
        if self.committed.contains(&object_id) {
            return Some(CommitOutcome {
                records: Vec::new(),
                existed: true,
            });
        }
        if !self.prepared.contains(&object_id) {
            return None;
        }
        self.committed.insert(object_id);
        Some(CommitOutcome {
            records: Vec::new(),
            existed: false,
        })
    }
}
