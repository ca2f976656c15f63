// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

//! Demo CLI driving `streamctl_core::StreamControlManager` against a
//! local, newline-delimited JSON record log standing in for the
//! replicated metadata log transport a real cluster would use.

use base::Error;
use bpaf::Bpaf;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

mod cmds;
mod config;
mod record_log;

/// Drives a Stream Control Manager against a local record log.
#[derive(Bpaf, Debug)]
#[bpaf(options)]
enum Args {
    Create(#[bpaf(external(cmds::create::args))] cmds::create::Args),
    Open(#[bpaf(external(cmds::open::args))] cmds::open::Args),
    Commit(#[bpaf(external(cmds::commit::args))] cmds::commit::Args),
    Check(#[bpaf(external(cmds::check::args))] cmds::check::Args),
    Dump(#[bpaf(external(cmds::dump::args))] cmds::dump::Args),
}

impl Args {
    fn run(self) -> Result<i32, Error> {
        match self {
            Args::Create(a) => cmds::create::run(a),
            Args::Open(a) => cmds::open::run(a),
            Args::Commit(a) => cmds::commit::run(a),
            Args::Check(a) => cmds::check::run(a),
            Args::Dump(a) => cmds::dump::run(a),
        }
    }
}

fn main() {
    base::tracing_setup::install();

    let progname = std::env::args_os().next().map(PathBuf::from);
    let progname = progname
        .as_deref()
        .and_then(Path::file_name)
        .and_then(OsStr::to_str)
        .unwrap_or(env!("CARGO_PKG_NAME"));

    let args = match args()
        .fallback_to_usage()
        .run_inner(bpaf::Args::current_args().set_name(progname))
    {
        Ok(a) => a,
        Err(e) => std::process::exit(e.exit_code()),
    };
    tracing::trace!("parsed command-line arguments: {args:#?}");

    match args.run() {
        Err(e) => {
            error!(err = %e.chain(), "exiting due to error");
            std::process::exit(1);
        }
        Ok(rv) => {
            debug!("exiting with status {}", rv);
            std::process::exit(rv)
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn bpaf_invariants() {
        super::args().check_invariants(false);
    }
}
