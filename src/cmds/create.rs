// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

use base::Error;
use bpaf::Bpaf;
use std::path::PathBuf;
use tracing::info;

/// Allocates a new stream.
#[derive(Bpaf, Debug)]
#[bpaf(command("create"))]
pub struct Args {
    #[bpaf(external(super::parse_log_path))]
    log: PathBuf,
}

pub fn run(args: Args) -> Result<i32, Error> {
    let mgr = super::load_manager(&args.log)?;
    let result = mgr.create_stream();
    crate::record_log::append(&args.log, &result.records)?;
    info!(stream_id = %result.response.stream_id, "created stream");
    println!("{}", result.response.stream_id);
    Ok(0)
}
