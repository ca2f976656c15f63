// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

//! Rebuilding a fresh manager by replaying the record log in order must
//! reproduce exactly the live manager's state.

use streamctl_core::ids::{BrokerId, Epoch, ObjectId, Offset};
use streamctl_core::object_store::FakeObjectStore;
use streamctl_core::{CommitWalObjectRequest, ObjectStreamRange, OpenStreamRequest, Record, StreamControlManager};

#[test]
fn replay_from_scratch_matches_live_state() {
    let mut live = StreamControlManager::new();
    let mut log: Vec<Record> = Vec::new();
    let mut store = FakeObjectStore::new();

    let create0 = live.create_stream();
    log.extend(create0.records.clone());
    live.replay_all(&create0.records);
    let sid0 = create0.response.stream_id;

    let create1 = live.create_stream();
    log.extend(create1.records.clone());
    live.replay_all(&create1.records);
    let sid1 = create1.response.stream_id;

    let open0 = live.open_stream(OpenStreamRequest {
        stream_id: sid0,
        stream_epoch: Epoch::ZERO,
        broker_id: BrokerId(0),
    });
    log.extend(open0.records.clone());
    live.replay_all(&open0.records);

    store.prepare(ObjectId(0));
    let commit = live.commit_wal_object(
        CommitWalObjectRequest {
            object_id: ObjectId(0),
            broker_id: BrokerId(0),
            object_size: 4096,
            object_stream_ranges: vec![ObjectStreamRange {
                stream_id: sid0,
                stream_epoch: Epoch::ZERO,
                start_offset: Offset::ZERO,
                end_offset: Offset(1000),
            }],
        },
        &mut store,
    );
    log.extend(commit.records.clone());
    live.replay_all(&commit.records);

    let reopen = live.open_stream(OpenStreamRequest {
        stream_id: sid0,
        stream_epoch: Epoch(1),
        broker_id: BrokerId(1),
    });
    log.extend(reopen.records.clone());
    live.replay_all(&reopen.records);

    let removed = live.plan_remove_stream(sid1);
    log.extend(removed.clone());
    live.replay_all(&removed);

    let rebuilt = StreamControlManager::from_records(&log);
    assert_eq!(rebuilt.state(), live.state());
}
