// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

//! Offline invariant auditor: walks live state and reports every problem
//! found rather than stopping at the first one or panicking. Unlike
//! [`crate::replay`],
//! which trusts the log and panics on a broken invariant, this is for
//! state nobody has proven came from valid replay — e.g. a snapshot file
//! loaded from disk.

use crate::state::ManagerState;
use std::fmt;

/// One violated invariant, numbered to match the data model's own
/// numbering. Only invariants that are actually derivable from a single
/// [`ManagerState`] snapshot are reported here (currently 1-4) — see
/// [`verify`] for which numbers are skipped and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub invariant: u8,
    pub detail: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invariant {}: {}", self.invariant, self.detail)
    }
}

/// Re-derives invariants 1-4 from the live state and returns each
/// violation found. An empty result means the state is internally
/// consistent; it does not mean the state matches what replaying the
/// record log from scratch would produce (see `tests/replay_consistency.rs`
/// for that check).
///
/// Invariants 5 and 6 are not checked: invariant 5 ("a non-current
/// range's `endOffset` is immutable") constrains state *transitions*, not
/// any single snapshot, and invariant 6 ("every committed `objectId` was
/// confirmed existing before the record was produced") is a fact about
/// what happened before the record was produced, which a `ManagerState`
/// snapshot retains no trace of. Neither is derivable from `state` alone,
/// so there is no tautology-free check to run here for them.
pub fn verify(state: &ManagerState) -> Vec<Violation> {
    let mut violations = Vec::new();

    let max_live_id = state.streams.keys().map(|id| id.get()).max();
    if let Some(max) = max_live_id {
        if state.next_assigned_stream_id.get() <= max {
            violations.push(Violation {
                invariant: 1,
                detail: format!(
                    "next_assigned_stream_id {} does not exceed live stream id {}",
                    state.next_assigned_stream_id, max
                ),
            });
        }
    }

    for (stream_id, stream) in &state.streams {
        let mut indices: Vec<_> = stream.ranges.keys().copied().collect();
        indices.sort_unstable();

        match stream.current_range_index {
            None => {
                if !indices.is_empty() {
                    violations.push(Violation {
                        invariant: 2,
                        detail: format!("stream {stream_id} has ranges but no current range index"),
                    });
                }
            }
            Some(cur) => {
                let expected: Vec<_> = (0..=cur).collect();
                if indices != expected {
                    violations.push(Violation {
                        invariant: 2,
                        detail: format!(
                            "stream {stream_id} ranges {:?} do not form a dense [0, {cur}] sequence",
                            indices
                        ),
                    });
                }
            }
        }

        for w in indices.windows(2) {
            let (a, b) = (&stream.ranges[&w[0]], &stream.ranges[&w[1]]);
            if b.start_offset != a.end_offset {
                violations.push(Violation {
                    invariant: 3,
                    detail: format!(
                        "stream {stream_id} range {} starts at {} but range {} ends at {}",
                        w[1], b.start_offset, w[0], a.end_offset
                    ),
                });
            }
            if b.epoch <= a.epoch {
                violations.push(Violation {
                    invariant: 3,
                    detail: format!(
                        "stream {stream_id} range {} epoch {} does not exceed range {} epoch {}",
                        w[1], b.epoch, w[0], a.epoch
                    ),
                });
            }
        }

        if let Some(current) = stream.current_range() {
            if current.epoch != stream.current_epoch {
                violations.push(Violation {
                    invariant: 4,
                    detail: format!(
                        "stream {stream_id} current range epoch {} differs from stream epoch {}",
                        current.epoch, stream.current_epoch
                    ),
                });
            }
        }
    }

    violations
}
