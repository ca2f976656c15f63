// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

//! The commit planner behind `commitWALObject`.
//!
//! Per-stream atomic, cross-stream best-effort: a broker fenced out of
//! stream *X* but still owning stream *Y* in the same WAL object must
//! still be able to durably record *Y*'s portion, so a bad range is
//! soft-rejected into `failed_stream_ids` rather than failing the whole
//! commit.

use crate::ids::StreamId;
use crate::manager::{
    CommitWalObjectRequest, CommitWalObjectResponse, ControllerResult, ErrorCode, ObjectStreamRange,
};
use crate::object_store::ObjectCollaborator;
use crate::records::{BrokerWALMetadataRecord, Record, WALObjectRecord, WALObjectStreamRange};
use crate::state::ManagerState;
use tracing::{debug, warn};

pub fn plan_commit_wal_object(
    state: &ManagerState,
    req: CommitWalObjectRequest,
    objects: &mut dyn ObjectCollaborator,
) -> ControllerResult<CommitWalObjectResponse> {
    let Some(outcome) = objects.commit_object(req.object_id, req.object_size) else {
        warn!(object_id = %req.object_id, "commitWALObject: object was never prepared");
        return ControllerResult::new(
            CommitWalObjectResponse {
                error_code: ErrorCode::ObjectNotExist,
                failed_stream_ids: Vec::new(),
            },
            Vec::new(),
        );
    };

    let mut failed_stream_ids = Vec::new();
    let mut surviving = Vec::new();
    for range in &req.object_stream_ranges {
        match validate_range(state, range, req.broker_id) {
            Ok(()) => surviving.push(WALObjectStreamRange {
                stream_id: range.stream_id,
                end_offset: range.end_offset,
            }),
            Err(reason) => {
                debug!(stream_id = %range.stream_id, reason, "commitWALObject: soft-rejecting range");
                failed_stream_ids.push(range.stream_id);
            }
        }
    }

    let mut records = Vec::new();
    if !surviving.is_empty() {
        if !state.brokers.contains_key(&req.broker_id) {
            records.push(Record::BrokerWALMetadata(BrokerWALMetadataRecord {
                broker_id: req.broker_id,
            }));
        }
        if !outcome.existed {
            records.push(Record::WALObject(WALObjectRecord {
                object_id: req.object_id,
                broker_id: req.broker_id,
                object_size: req.object_size,
                stream_ranges: surviving,
            }));
        }
    }
    records.extend(outcome.records);

    ControllerResult::new(
        CommitWalObjectResponse {
            error_code: ErrorCode::None,
            failed_stream_ids,
        },
        records,
    )
}

fn validate_range(
    state: &ManagerState,
    range: &ObjectStreamRange,
    committing_broker: crate::ids::BrokerId,
) -> Result<(), &'static str> {
    let Some(stream) = state.streams.get(&range.stream_id) else {
        return Err("stream does not exist");
    };
    let Some(current) = stream.current_range() else {
        return Err("stream has no current range");
    };
    if range.stream_epoch != stream.current_epoch {
        return Err("epoch mismatch");
    }
    if current.broker_id != committing_broker {
        return Err("broker does not own current range");
    }
    if range.start_offset != current.end_offset {
        return Err("start offset not contiguous with current range");
    }
    if range.end_offset <= range.start_offset {
        return Err("end offset does not advance the range");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{BrokerId, Epoch, ObjectId};
    use crate::manager::{OpenStreamRequest, StreamControlManager};
    use crate::object_store::FakeObjectStore;

    fn opened_stream(mgr: &mut StreamControlManager, broker: BrokerId) -> StreamId {
        let r = mgr.create_stream();
        mgr.replay_all(&r.records);
        let sid = r.response.stream_id;
        let open = mgr.open_stream(OpenStreamRequest {
            stream_id: sid,
            stream_epoch: Epoch::ZERO,
            broker_id: broker,
        });
        mgr.replay_all(&open.records);
        sid
    }

    #[test]
    fn commit_unprepared_object_fails() {
        let mut mgr = StreamControlManager::new();
        let mut store = FakeObjectStore::new();
        let res = mgr.commit_wal_object(
            CommitWalObjectRequest {
                object_id: ObjectId(1),
                broker_id: BrokerId(0),
                object_size: 10,
                object_stream_ranges: Vec::new(),
            },
            &mut store,
        );
        assert_eq!(res.response.error_code, ErrorCode::ObjectNotExist);
        assert!(res.records.is_empty());
    }

    #[test]
    fn commit_advances_range_and_creates_broker_container() {
        let mut mgr = StreamControlManager::new();
        let sid = opened_stream(&mut mgr, BrokerId(0));
        let mut store = FakeObjectStore::new();
        store.prepare(ObjectId(1));

        let res = mgr.commit_wal_object(
            CommitWalObjectRequest {
                object_id: ObjectId(1),
                broker_id: BrokerId(0),
                object_size: 100,
                object_stream_ranges: vec![ObjectStreamRange {
                    stream_id: sid,
                    stream_epoch: Epoch::ZERO,
                    start_offset: crate::ids::Offset::ZERO,
                    end_offset: crate::ids::Offset(100),
                }],
            },
            &mut store,
        );
        assert_eq!(res.response.error_code, ErrorCode::None);
        assert!(res.response.failed_stream_ids.is_empty());
        assert_eq!(res.records.len(), 2);
        mgr.replay_all(&res.records);

        let stream = &mgr.state().streams[&sid];
        assert_eq!(stream.current_range().unwrap().end_offset, crate::ids::Offset(100));
        assert!(mgr.state().brokers[&BrokerId(0)].contains(ObjectId(1)));
    }

    #[test]
    fn non_contiguous_range_is_soft_rejected() {
        let mut mgr = StreamControlManager::new();
        let sid = opened_stream(&mut mgr, BrokerId(0));
        let mut store = FakeObjectStore::new();
        store.prepare(ObjectId(1));

        let res = mgr.commit_wal_object(
            CommitWalObjectRequest {
                object_id: ObjectId(1),
                broker_id: BrokerId(0),
                object_size: 100,
                object_stream_ranges: vec![ObjectStreamRange {
                    stream_id: sid,
                    stream_epoch: Epoch::ZERO,
                    start_offset: crate::ids::Offset(50),
                    end_offset: crate::ids::Offset(100),
                }],
            },
            &mut store,
        );
        assert_eq!(res.response.error_code, ErrorCode::None);
        assert_eq!(res.response.failed_stream_ids, vec![sid]);
        assert!(res.records.is_empty());
    }

    #[test]
    fn already_committed_object_is_idempotent() {
        let mut mgr = StreamControlManager::new();
        let sid = opened_stream(&mut mgr, BrokerId(0));
        let mut store = FakeObjectStore::new();
        store.prepare(ObjectId(1));

        let r1 = mgr.commit_wal_object(
            CommitWalObjectRequest {
                object_id: ObjectId(1),
                broker_id: BrokerId(0),
                object_size: 100,
                object_stream_ranges: vec![ObjectStreamRange {
                    stream_id: sid,
                    stream_epoch: Epoch::ZERO,
                    start_offset: crate::ids::Offset::ZERO,
                    end_offset: crate::ids::Offset(100),
                }],
            },
            &mut store,
        );
        mgr.replay_all(&r1.records);

        // Resubmit the same already-committed object id, but with a range
        // that's still valid against the now-advanced stream (contiguous
        // with the end offset the first commit left behind). Validation
        // must succeed here — this is what isolates the `existed` branch
        // (commit.rs's conditional `WALObject` emission) from a soft
        // rejection, which would also leave `records` empty but for an
        // unrelated reason.
        let r2 = mgr.commit_wal_object(
            CommitWalObjectRequest {
                object_id: ObjectId(1),
                broker_id: BrokerId(0),
                object_size: 100,
                object_stream_ranges: vec![ObjectStreamRange {
                    stream_id: sid,
                    stream_epoch: Epoch::ZERO,
                    start_offset: crate::ids::Offset(100),
                    end_offset: crate::ids::Offset(200),
                }],
            },
            &mut store,
        );
        assert_eq!(r2.response.error_code, ErrorCode::None);
        assert!(r2.response.failed_stream_ids.is_empty());
        assert!(r2.records.is_empty());
    }
}
