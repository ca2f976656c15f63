// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

use base::Error;
use bpaf::Bpaf;
use std::path::PathBuf;
use streamctl_core::check;
use tracing::warn;

/// Audits the record log's replayed state against the data model's
/// invariants, reporting every violation found rather than stopping at
/// the first one.
#[derive(Bpaf, Debug)]
#[bpaf(command("check"))]
pub struct Args {
    #[bpaf(external(super::parse_log_path))]
    log: PathBuf,
}

pub fn run(args: Args) -> Result<i32, Error> {
    let mgr = super::load_manager(&args.log)?;
    let violations = check::verify(mgr.state());
    if violations.is_empty() {
        println!("ok: no invariant violations");
        return Ok(0);
    }
    for v in &violations {
        warn!(%v, "invariant violation");
        println!("{v}");
    }
    Ok(1)
}
