// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

//! The epoch/fencing state machine behind `openStream`.

use crate::manager::{ControllerResult, ErrorCode, OpenStreamRequest, OpenStreamResponse};
use crate::records::{Record, RangeRecord, S3StreamRecord};
use crate::state::ManagerState;
use tracing::{debug, warn};

/// `openStream`: validates `(streamEpoch, brokerId)` against the stream's
/// current owner and either grants a new range or rejects the request.
///
/// Preconditions are checked in a fixed order; the first failure wins and
/// no records are emitted for any failure.
pub fn plan_open_stream(state: &ManagerState, req: OpenStreamRequest) -> ControllerResult<OpenStreamResponse> {
    let Some(stream) = state.streams.get(&req.stream_id) else {
        warn!(stream_id = %req.stream_id, "openStream: no such stream");
        return ControllerResult::new(
            OpenStreamResponse {
                error_code: ErrorCode::StreamNotExist,
                start_offset: crate::ids::Offset::ZERO,
                next_offset: crate::ids::Offset::ZERO,
            },
            Vec::new(),
        );
    };

    let cur = stream.current_epoch;
    let cur_range = stream.current_range();

    if req.stream_epoch < cur {
        debug!(
            stream_id = %req.stream_id, requested = %req.stream_epoch, current = %cur,
            "openStream: fenced (stale epoch)"
        );
        return fenced(stream.start_offset);
    }

    if req.stream_epoch == cur {
        match cur_range {
            // First-time open at epoch 0 on a freshly created stream: there is
            // no existing owner to be idempotent with, so this is a first
            // open, not a no-op.
            None => {}
            Some(range) if range.broker_id == req.broker_id => {
                debug!(stream_id = %req.stream_id, broker_id = %req.broker_id, "openStream: idempotent reopen");
                return ControllerResult::new(
                    OpenStreamResponse {
                        error_code: ErrorCode::None,
                        start_offset: stream.start_offset,
                        next_offset: range.end_offset,
                    },
                    Vec::new(),
                );
            }
            Some(_) => {
                debug!(
                    stream_id = %req.stream_id, requested_broker = %req.broker_id,
                    "openStream: fenced (different broker, same epoch)"
                );
                return fenced(stream.start_offset);
            }
        }
    }

    // req.stream_epoch > cur, or first-time open at epoch == cur == 0: grant a new range.
    let new_range_index = stream.current_range_index.map(|i| i + 1).unwrap_or(0);
    let prev_end_offset = cur_range.map(|r| r.end_offset).unwrap_or(crate::ids::Offset::ZERO);

    debug!(
        stream_id = %req.stream_id, broker_id = %req.broker_id, epoch = %req.stream_epoch,
        new_range_index, "openStream: granting new range"
    );

    let records = vec![
        Record::S3Stream(S3StreamRecord {
            stream_id: req.stream_id,
            epoch: req.stream_epoch,
            current_range_index: Some(new_range_index),
            start_offset: stream.start_offset,
        }),
        Record::Range(RangeRecord {
            stream_id: req.stream_id,
            range_index: new_range_index,
            epoch: req.stream_epoch,
            broker_id: req.broker_id,
            start_offset: prev_end_offset,
            end_offset: prev_end_offset,
        }),
    ];

    ControllerResult::new(
        OpenStreamResponse {
            error_code: ErrorCode::None,
            start_offset: stream.start_offset,
            next_offset: prev_end_offset,
        },
        records,
    )
}

fn fenced(start_offset: crate::ids::Offset) -> ControllerResult<OpenStreamResponse> {
    ControllerResult::new(
        OpenStreamResponse {
            error_code: ErrorCode::StreamFenced,
            start_offset,
            next_offset: crate::ids::Offset::ZERO,
        },
        Vec::new(),
    )
}
