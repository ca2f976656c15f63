// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

//! The replay dispatcher: the sole mutator of [`ManagerState`]. Every
//! controller — leader or follower — reaches the same state by replaying
//! the same records in the same order through [`apply`].
//!
//! A record that cannot be applied is a programmer error or log corruption,
//! not a recoverable condition: the log is trusted, so we panic rather than
//! thread a `Result` through every call site.

use crate::ids::Offset;
use crate::records::Record;
use crate::state::{ManagerState, RangeMetadata, StreamMetadata};
use tracing::{debug, trace};

/// Applies a single record to `state`, mutating it in place.
///
/// # Panics
///
/// Panics if the record is inconsistent with the live state — e.g. a
/// `Range` record for a stream that doesn't exist, or a `WALObject` record
/// touching a stream with no current range. These are invariant
/// violations, not validation failures; validation happens before a record
/// is ever produced (see [`crate::manager`]), so reaching `replay` with a
/// bad record means the log itself is wrong.
pub fn apply(state: &mut ManagerState, record: &Record) {
    trace!(?record, "replaying record");
    match record {
        Record::AssignedStreamId(r) => {
            state.next_assigned_stream_id = r.next_assigned_stream_id;
        }
        Record::S3Stream(r) => {
            debug!(stream_id = %r.stream_id, epoch = %r.epoch, "replay: upsert stream");
            state
                .streams
                .entry(r.stream_id)
                .and_modify(|s| {
                    s.current_epoch = r.epoch;
                    s.current_range_index = r.current_range_index;
                    s.start_offset = r.start_offset;
                })
                .or_insert_with(|| StreamMetadata {
                    stream_id: r.stream_id,
                    current_epoch: r.epoch,
                    current_range_index: r.current_range_index,
                    start_offset: r.start_offset,
                    ranges: Default::default(),
                });
        }
        Record::RemoveS3Stream(r) => {
            debug!(stream_id = %r.stream_id, "replay: remove stream");
            state.streams.remove(&r.stream_id);
        }
        Record::Range(r) => {
            let stream = state
                .streams
                .get_mut(&r.stream_id)
                .unwrap_or_else(|| panic!("Range record for unknown stream {}", r.stream_id));
            stream.ranges.insert(
                r.range_index,
                RangeMetadata {
                    range_index: r.range_index,
                    epoch: r.epoch,
                    broker_id: r.broker_id,
                    start_offset: r.start_offset,
                    end_offset: r.end_offset,
                },
            );
        }
        Record::RemoveRange(r) => {
            let stream = state
                .streams
                .get_mut(&r.stream_id)
                .unwrap_or_else(|| panic!("RemoveRange record for unknown stream {}", r.stream_id));
            stream.ranges.remove(&r.range_index);
        }
        Record::BrokerWALMetadata(r) => {
            debug!(broker_id = %r.broker_id, "replay: ensure broker container");
            state
                .brokers
                .entry(r.broker_id)
                .or_insert_with(|| crate::state::BrokerMetadata {
                    broker_id: Some(r.broker_id),
                    ..Default::default()
                });
        }
        Record::WALObject(r) => {
            debug!(
                object_id = %r.object_id,
                broker_id = %r.broker_id,
                streams = r.stream_ranges.len(),
                "replay: wal object"
            );
            let broker = state.brokers.entry(r.broker_id).or_insert_with(|| {
                crate::state::BrokerMetadata {
                    broker_id: Some(r.broker_id),
                    ..Default::default()
                }
            });
            broker.insert(r.object_id);
            for range in &r.stream_ranges {
                let stream = state.streams.get_mut(&range.stream_id).unwrap_or_else(|| {
                    panic!("WALObject record for unknown stream {}", range.stream_id)
                });
                let idx = stream.current_range_index.unwrap_or_else(|| {
                    panic!(
                        "WALObject record for stream {} with no current range",
                        range.stream_id
                    )
                });
                let cur = stream
                    .ranges
                    .get_mut(&idx)
                    .unwrap_or_else(|| panic!("current range {idx} missing for stream {}", range.stream_id));
                set_end_offset(cur, range.end_offset);
            }
        }
    }
}

fn set_end_offset(range: &mut RangeMetadata, end: Offset) {
    range.end_offset = end;
}

/// Applies a whole batch of records in order. Equivalent to calling
/// [`apply`] once per record, provided for readability at call sites that
/// just appended a [`crate::manager::ControllerResult`]'s records.
pub fn apply_all(state: &mut ManagerState, records: &[Record]) {
    for record in records {
        apply(state, record);
    }
}
