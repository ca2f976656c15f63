// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

use base::{Error, ResultExt};
use bpaf::Bpaf;
use std::path::PathBuf;

/// Prints the live state reconstructed from the record log, as JSON.
#[derive(Bpaf, Debug)]
#[bpaf(command("dump"))]
pub struct Args {
    #[bpaf(external(super::parse_log_path))]
    log: PathBuf,
}

pub fn run(args: Args) -> Result<i32, Error> {
    let mgr = super::load_manager(&args.log)?;
    let json = serde_json::to_string_pretty(mgr.state()).err_kind(base::ErrorKind::Internal)?;
    println!("{json}");
    Ok(0)
}
