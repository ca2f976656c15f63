// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

use base::Error;
use bpaf::Bpaf;
use std::path::PathBuf;
use streamctl_core::ids::{BrokerId, Epoch, StreamId};
use streamctl_core::OpenStreamRequest;
use tracing::info;

/// Requests write ownership of a stream at a given epoch.
#[derive(Bpaf, Debug)]
#[bpaf(command("open"))]
pub struct Args {
    #[bpaf(external(super::parse_log_path))]
    log: PathBuf,

    /// Stream to open.
    #[bpaf(long("stream"), argument("ID"))]
    stream_id: u64,

    /// Epoch the requesting broker is opening at.
    #[bpaf(long("epoch"), argument("N"))]
    epoch: u64,

    /// Broker requesting ownership.
    #[bpaf(long("broker"), argument("ID"))]
    broker_id: u64,
}

pub fn run(args: Args) -> Result<i32, Error> {
    let mgr = super::load_manager(&args.log)?;
    let result = mgr.open_stream(OpenStreamRequest {
        stream_id: StreamId(args.stream_id),
        stream_epoch: Epoch(args.epoch),
        broker_id: BrokerId(args.broker_id),
    });
    crate::record_log::append(&args.log, &result.records)?;
    info!(
        stream_id = args.stream_id,
        error_code = ?result.response.error_code,
        "openStream"
    );
    println!("{:?}", result.response);
    Ok(0)
}
