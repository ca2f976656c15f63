// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

//! The `StreamControlManager`: the public surface operations are called
//! through, and the only place that owns live [`ManagerState`].
//!
//! An operation **never mutates state directly**. It reads
//! `self.state`, computes a response plus an ordered list of records, and
//! returns both as a [`ControllerResult`]. The caller is responsible for
//! appending the records to the metadata log and, once durable, feeding
//! them back through [`StreamControlManager::replay`] — the same path
//! every other controller (including this one) takes. This file only
//! wires the three RPC-shaped operations and the snapshot/replay plumbing
//! together; the actual per-operation logic lives in
//! [`crate::registry`], [`crate::epoch`], and [`crate::commit`].

use crate::epoch;
use crate::ids::{BrokerId, Epoch, ObjectId, Offset, StreamId};
use crate::object_store::ObjectCollaborator;
use crate::records::Record;
use crate::state::ManagerState;
use crate::{commit, registry};

/// Error codes reported on the RPC surface.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ErrorCode {
    None,
    StreamNotExist,
    StreamFenced,
    ObjectNotExist,
}

/// An operation's response paired with the ordered records it wants
/// appended to the metadata log. Produced by `plan_*`/RPC-shaped methods;
/// never applied to state directly — see module docs.
#[derive(Clone, Debug)]
pub struct ControllerResult<R> {
    pub response: R,
    pub records: Vec<Record>,
}

impl<R> ControllerResult<R> {
    pub fn new(response: R, records: Vec<Record>) -> Self {
        ControllerResult { response, records }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CreateStreamResponse {
    pub error_code: ErrorCode,
    pub stream_id: StreamId,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct OpenStreamRequest {
    pub stream_id: StreamId,
    pub stream_epoch: Epoch,
    pub broker_id: BrokerId,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct OpenStreamResponse {
    pub error_code: ErrorCode,
    pub start_offset: Offset,
    pub next_offset: Offset,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ObjectStreamRange {
    pub stream_id: StreamId,
    pub stream_epoch: Epoch,
    pub start_offset: Offset,
    pub end_offset: Offset,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommitWalObjectRequest {
    pub object_id: ObjectId,
    pub broker_id: BrokerId,
    pub object_size: u64,
    pub object_stream_ranges: Vec<ObjectStreamRange>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommitWalObjectResponse {
    pub error_code: ErrorCode,
    pub failed_stream_ids: Vec<StreamId>,
}

/// Owns the live, replayed state. Construct with [`StreamControlManager::new`]
/// (an empty controller that has never replayed anything) and feed it
/// records from the metadata log as they become durable.
pub struct StreamControlManager {
    state: ManagerState,
}

impl Default for StreamControlManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamControlManager {
    pub fn new() -> Self {
        StreamControlManager {
            state: ManagerState::new(),
        }
    }

    /// Rebuilds a manager from a record log, in order. Used to verify that
    /// replaying the record log in order reproduces the live manager's
    /// state, and by the CLI to restore state on startup.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut m = Self::new();
        for r in records {
            m.replay(r);
        }
        m
    }

    pub fn state(&self) -> &ManagerState {
        &self.state
    }

    /// Applies a single durable record. The sole mutator of live state;
    /// see [`crate::replay::apply`].
    pub fn replay(&mut self, record: &Record) {
        crate::replay::apply(&mut self.state, record);
    }

    pub fn replay_all<'a>(&mut self, records: impl IntoIterator<Item = &'a Record>) {
        for r in records {
            self.replay(r);
        }
    }

    /// Allocates a new stream.
    pub fn create_stream(&self) -> ControllerResult<CreateStreamResponse> {
        registry::plan_create_stream(&self.state)
    }

    /// Requests write ownership of a stream at a given epoch.
    pub fn open_stream(&self, req: OpenStreamRequest) -> ControllerResult<OpenStreamResponse> {
        epoch::plan_open_stream(&self.state, req)
    }

    /// Validates and plans a multi-stream WAL object commit.
    pub fn commit_wal_object(
        &self,
        req: CommitWalObjectRequest,
        objects: &mut dyn ObjectCollaborator,
    ) -> ControllerResult<CommitWalObjectResponse> {
        commit::plan_commit_wal_object(&self.state, req, objects)
    }

    /// Not part of the public RPC surface: `RemoveS3StreamRecord` is a
    /// record kind the replay dispatcher must accept, but no RPC produces
    /// it. This is that caller, kept off the public operation surface, so
    /// the record is reachable through a real planning path instead of
    /// only hand-constructed in replay tests.
    pub fn plan_remove_stream(&self, stream_id: StreamId) -> Vec<Record> {
        registry::plan_remove_stream(&self.state, stream_id)
    }

    /// See [`Self::plan_remove_stream`]; same rationale for `RemoveRange`.
    pub fn plan_remove_range(
        &self,
        stream_id: StreamId,
        range_index: crate::ids::RangeIndex,
    ) -> Vec<Record> {
        registry::plan_remove_range(&self.state, stream_id, range_index)
    }
}
