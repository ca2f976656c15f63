// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

//! The record taxonomy: the only values ever appended to the metadata log,
//! and the only values [`crate::replay`] ever consumes. Names are preserved
//! bit-exact for log compatibility across controllers.
//!
//! Modeled as a single sealed enum, exhaustively matched by `replay`, so a
//! new record kind that replay doesn't yet handle is a compile error rather
//! than a silent no-op.

use crate::ids::{BrokerId, Epoch, ObjectId, RangeIndex, StreamId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedStreamIdRecord {
    pub next_assigned_stream_id: StreamId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3StreamRecord {
    pub stream_id: StreamId,
    pub epoch: Epoch,
    /// `None` encodes "no current range yet" (a freshly created stream
    /// that has never been opened).
    pub current_range_index: Option<RangeIndex>,
    pub start_offset: crate::ids::Offset,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveS3StreamRecord {
    pub stream_id: StreamId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeRecord {
    pub stream_id: StreamId,
    pub range_index: RangeIndex,
    pub epoch: Epoch,
    pub broker_id: BrokerId,
    pub start_offset: crate::ids::Offset,
    pub end_offset: crate::ids::Offset,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveRangeRecord {
    pub stream_id: StreamId,
    pub range_index: RangeIndex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerWALMetadataRecord {
    pub broker_id: BrokerId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WALObjectStreamRange {
    pub stream_id: StreamId,
    pub end_offset: crate::ids::Offset,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WALObjectRecord {
    pub object_id: ObjectId,
    pub broker_id: BrokerId,
    pub object_size: u64,
    pub stream_ranges: Vec<WALObjectStreamRange>,
}

/// A single metadata record, as it would be appended to the replicated log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Record {
    AssignedStreamId(AssignedStreamIdRecord),
    S3Stream(S3StreamRecord),
    RemoveS3Stream(RemoveS3StreamRecord),
    Range(RangeRecord),
    RemoveRange(RemoveRangeRecord),
    BrokerWALMetadata(BrokerWALMetadataRecord),
    WALObject(WALObjectRecord),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{Epoch, Offset, StreamId};

    /// The CLI's record log is newline-delimited JSON; a record that
    /// doesn't round-trip through `serde_json` would silently corrupt
    /// every controller's replayed state on restart.
    #[test]
    fn record_round_trips_through_json() {
        let record = Record::S3Stream(S3StreamRecord {
            stream_id: StreamId(7),
            epoch: Epoch(2),
            current_range_index: Some(1),
            start_offset: Offset::ZERO,
        });
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"type":"S3Stream","stream_id":7,"epoch":2,"current_range_index":1,"start_offset":0}"#);
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn freshly_created_stream_round_trips_with_no_current_range() {
        let record = Record::S3Stream(S3StreamRecord {
            stream_id: StreamId(0),
            epoch: Epoch::ZERO,
            current_range_index: None,
            start_offset: Offset::ZERO,
        });
        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
