// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

//! Property tests over random sequences of valid operations, checking
//! the universal invariants from the data model section: range
//! contiguity, strictly increasing per-stream range epochs, strict
//! monotonicity of the stream id allocator, and replay-from-scratch
//! equivalence.

use proptest::prelude::*;
use streamctl_core::check;
use streamctl_core::ids::{BrokerId, Epoch, StreamId};
use streamctl_core::{OpenStreamRequest, Record, StreamControlManager};

#[derive(Clone, Debug)]
enum Op {
    Create,
    Open { stream: u64, epoch: u64, broker: u64 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Create),
        5 => (0u64..4, 0u64..4, 0u64..3).prop_map(|(stream, epoch, broker)| Op::Open {
            stream,
            epoch,
            broker
        }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn random_operation_sequences_uphold_invariants(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut mgr = StreamControlManager::new();
        let mut log: Vec<Record> = Vec::new();
        let mut created = 0u64;

        for op in ops {
            match op {
                Op::Create => {
                    let r = mgr.create_stream();
                    log.extend(r.records.clone());
                    mgr.replay_all(&r.records);
                    created += 1;
                }
                Op::Open { stream, epoch, broker } => {
                    if stream >= created {
                        continue;
                    }
                    let r = mgr.open_stream(OpenStreamRequest {
                        stream_id: StreamId(stream),
                        stream_epoch: Epoch(epoch),
                        broker_id: BrokerId(broker),
                    });
                    log.extend(r.records.clone());
                    mgr.replay_all(&r.records);
                }
            }
        }

        let violations = check::verify(mgr.state());
        prop_assert!(violations.is_empty(), "invariant violations: {:?}", violations);

        let rebuilt = StreamControlManager::from_records(&log);
        prop_assert_eq!(rebuilt.state(), mgr.state());

        if let Some(max) = mgr.state().streams.keys().map(|id| id.get()).max() {
            prop_assert!(mgr.state().next_assigned_stream_id.get() > max);
        }
    }

    #[test]
    fn reopen_with_same_owner_is_idempotent(
        epoch in 0u64..5,
        broker in 0u64..3,
    ) {
        let mut mgr = StreamControlManager::new();
        let create = mgr.create_stream();
        mgr.replay_all(&create.records);
        let sid = create.response.stream_id;

        let first = mgr.open_stream(OpenStreamRequest {
            stream_id: sid,
            stream_epoch: Epoch(epoch),
            broker_id: BrokerId(broker),
        });
        mgr.replay_all(&first.records);

        let second = mgr.open_stream(OpenStreamRequest {
            stream_id: sid,
            stream_epoch: Epoch(epoch),
            broker_id: BrokerId(broker),
        });
        prop_assert_eq!(second.response, first.response);
        prop_assert!(second.records.is_empty());
    }
}
