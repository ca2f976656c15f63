// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

//! The live, versioned state every operation reads and every replayed
//! record mutates. Plain data only — no I/O, no locking: the manager runs
//! on a single-threaded controller event loop and needs none.

use crate::ids::{BrokerId, Epoch, ObjectId, Offset, RangeIndex, StreamId};
use base::{FastHashMap, FastHashSet};
use serde::Serialize;

/// One contiguous offset window written under a single `(epoch, broker)`
/// ownership.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RangeMetadata {
    pub range_index: RangeIndex,
    pub epoch: Epoch,
    pub broker_id: BrokerId,
    pub start_offset: Offset,
    pub end_offset: Offset,
}

/// Metadata for one live stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StreamMetadata {
    pub stream_id: StreamId,
    pub current_epoch: Epoch,
    /// `None` before any open (no current range yet).
    pub current_range_index: Option<RangeIndex>,
    pub start_offset: Offset,
    /// Dense, keyed `0..=current_range_index`.
    pub ranges: FastHashMap<RangeIndex, RangeMetadata>,
}

impl StreamMetadata {
    pub fn current_range(&self) -> Option<&RangeMetadata> {
        self.current_range_index
            .and_then(|idx| self.ranges.get(&idx))
    }
}

/// Metadata for one broker that has ever committed a WAL object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BrokerMetadata {
    pub broker_id: Option<BrokerId>,
    /// Committed WAL object ids, in commit order.
    pub wal_objects: Vec<ObjectId>,
    #[serde(skip)]
    wal_object_set: FastHashSet<ObjectId>,
}

impl BrokerMetadata {
    pub fn contains(&self, object_id: ObjectId) -> bool {
        self.wal_object_set.contains(&object_id)
    }

    pub(crate) fn insert(&mut self, object_id: ObjectId) {
        if self.wal_object_set.insert(object_id) {
            self.wal_objects.push(object_id);
        }
    }
}

/// All manager state that is versioned against the metadata log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ManagerState {
    pub next_assigned_stream_id: StreamId,
    pub streams: FastHashMap<StreamId, StreamMetadata>,
    pub brokers: FastHashMap<BrokerId, BrokerMetadata>,
}

impl ManagerState {
    pub fn new() -> Self {
        ManagerState::default()
    }
}
