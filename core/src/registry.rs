// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

//! Stream registry & ID allocator.

use crate::ids::{Offset, RangeIndex, StreamId};
use crate::manager::{ControllerResult, CreateStreamResponse, ErrorCode};
use crate::records::{AssignedStreamIdRecord, Record, RemoveRangeRecord, RemoveS3StreamRecord, S3StreamRecord};
use crate::state::ManagerState;
use tracing::debug;

/// `createStream`: always succeeds. Allocates the next id off the
/// monotonic counter and emits the two records that advance the
/// allocator and create the stream's initial (unopened) metadata.
pub fn plan_create_stream(state: &ManagerState) -> ControllerResult<CreateStreamResponse> {
    let id = state.next_assigned_stream_id;
    debug!(stream_id = %id, "planning createStream");
    let records = vec![
        Record::AssignedStreamId(AssignedStreamIdRecord {
            next_assigned_stream_id: StreamId(id.get() + 1),
        }),
        Record::S3Stream(S3StreamRecord {
            stream_id: id,
            epoch: crate::ids::Epoch::ZERO,
            current_range_index: None,
            start_offset: Offset::ZERO,
        }),
    ];
    ControllerResult::new(
        CreateStreamResponse {
            error_code: ErrorCode::None,
            stream_id: id,
        },
        records,
    )
}

/// Makes `RemoveS3StreamRecord` reachable through a real planning path
/// (see `manager::plan_remove_stream`). Not part of the public RPC surface.
pub fn plan_remove_stream(_state: &ManagerState, stream_id: StreamId) -> Vec<Record> {
    vec![Record::RemoveS3Stream(RemoveS3StreamRecord { stream_id })]
}

/// Makes `RemoveRangeRecord` reachable; see [`plan_remove_stream`].
pub fn plan_remove_range(_state: &ManagerState, stream_id: StreamId, range_index: RangeIndex) -> Vec<Record> {
    vec![Record::RemoveRange(RemoveRangeRecord {
        stream_id,
        range_index,
    })]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::StreamControlManager;

    #[test]
    fn create_two_streams_allocates_ids_in_order() {
        let mut mgr = StreamControlManager::new();

        let r1 = mgr.create_stream();
        assert_eq!(r1.response.error_code, ErrorCode::None);
        assert_eq!(r1.response.stream_id, StreamId(0));
        assert_eq!(
            r1.records,
            vec![
                Record::AssignedStreamId(AssignedStreamIdRecord {
                    next_assigned_stream_id: StreamId(1)
                }),
                Record::S3Stream(S3StreamRecord {
                    stream_id: StreamId(0),
                    epoch: crate::ids::Epoch::ZERO,
                    current_range_index: None,
                    start_offset: Offset::ZERO,
                }),
            ]
        );
        mgr.replay_all(&r1.records);

        let r2 = mgr.create_stream();
        assert_eq!(r2.response.stream_id, StreamId(1));
        mgr.replay_all(&r2.records);

        assert_eq!(mgr.state().next_assigned_stream_id, StreamId(2));
        for id in [StreamId(0), StreamId(1)] {
            let s = &mgr.state().streams[&id];
            assert_eq!(s.current_epoch, crate::ids::Epoch::ZERO);
            assert_eq!(s.current_range_index, None);
        }
    }

    #[test]
    fn remove_stream_record_deletes_it_on_replay() {
        let mut mgr = StreamControlManager::new();
        let r = mgr.create_stream();
        mgr.replay_all(&r.records);
        let id = r.response.stream_id;
        assert!(mgr.state().streams.contains_key(&id));

        let records = mgr.plan_remove_stream(id);
        mgr.replay_all(&records);
        assert!(!mgr.state().streams.contains_key(&id));
    }

    #[test]
    fn remove_range_record_deletes_it_on_replay() {
        use crate::manager::OpenStreamRequest;

        let mut mgr = StreamControlManager::new();
        let r = mgr.create_stream();
        mgr.replay_all(&r.records);
        let id = r.response.stream_id;

        let open = mgr.open_stream(OpenStreamRequest {
            stream_id: id,
            stream_epoch: crate::ids::Epoch::ZERO,
            broker_id: crate::ids::BrokerId(0),
        });
        mgr.replay_all(&open.records);
        assert!(mgr.state().streams[&id].ranges.contains_key(&0));

        let records = mgr.plan_remove_range(id, 0);
        mgr.replay_all(&records);
        assert!(!mgr.state().streams[&id].ranges.contains_key(&0));
    }
}
