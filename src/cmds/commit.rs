// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

use base::Error;
use bpaf::Bpaf;
use std::path::PathBuf;
use streamctl_core::ids::{BrokerId, Epoch, ObjectId, Offset, StreamId};
use streamctl_core::object_store::FakeObjectStore;
use streamctl_core::{CommitWalObjectRequest, ObjectStreamRange};
use tracing::info;

/// Commits a WAL object covering one stream's range.
///
/// The real shared-object lifecycle manager is out of scope for this
/// core; `--prepare` stands in for "the object store already confirmed
/// this object exists," since this demo has no persistent object store
/// of its own.
#[derive(Bpaf, Debug)]
#[bpaf(command("commit"))]
pub struct Args {
    #[bpaf(external(super::parse_log_path))]
    log: PathBuf,

    #[bpaf(long("object"), argument("ID"))]
    object_id: u64,

    #[bpaf(long("broker"), argument("ID"))]
    broker_id: u64,

    #[bpaf(long("size"), argument("BYTES"))]
    object_size: u64,

    #[bpaf(long("stream"), argument("ID"))]
    stream_id: u64,

    #[bpaf(long("epoch"), argument("N"))]
    stream_epoch: u64,

    #[bpaf(long("start"), argument("OFFSET"))]
    start_offset: u64,

    #[bpaf(long("end"), argument("OFFSET"))]
    end_offset: u64,

    /// Pretends the object collaborator already prepared this object id.
    #[bpaf(long("prepare"), switch)]
    prepare: bool,
}

pub fn run(args: Args) -> Result<i32, Error> {
    let mgr = super::load_manager(&args.log)?;

    let mut store = FakeObjectStore::new();
    if args.prepare {
        store.prepare(ObjectId(args.object_id));
    }

    let result = mgr.commit_wal_object(
        CommitWalObjectRequest {
            object_id: ObjectId(args.object_id),
            broker_id: BrokerId(args.broker_id),
            object_size: args.object_size,
            object_stream_ranges: vec![ObjectStreamRange {
                stream_id: StreamId(args.stream_id),
                stream_epoch: Epoch(args.stream_epoch),
                start_offset: Offset(args.start_offset),
                end_offset: Offset(args.end_offset),
            }],
        },
        &mut store,
    );
    crate::record_log::append(&args.log, &result.records)?;
    info!(
        object_id = args.object_id,
        error_code = ?result.response.error_code,
        failed = ?result.response.failed_stream_ids,
        "commitWALObject"
    );
    println!("{:?}", result.response);
    Ok(0)
}
