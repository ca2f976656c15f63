// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

use base::Error;
use bpaf::Parser;
use std::path::PathBuf;
use streamctl_core::StreamControlManager;

pub mod check;
pub mod commit;
pub mod create;
pub mod dump;
pub mod open;

/// Shared `--log` argument: the newline-delimited JSON record log every
/// subcommand reads and appends to. Defaults to whatever `streamctl.toml`
/// (if present in the working directory) configures, falling back to
/// `streamctl.log` otherwise.
pub fn parse_log_path() -> impl Parser<PathBuf> {
    let default = crate::config::Config::load(std::path::Path::new("streamctl.toml"))
        .map(|c| c.log_path)
        .unwrap_or_else(|_| PathBuf::from("streamctl.log"));
    bpaf::long("log")
        .help("Path to the newline-delimited JSON record log.")
        .argument::<PathBuf>("PATH")
        .fallback(default)
        .debug_fallback()
}

/// Loads the record log and replays it into a fresh manager, the way
/// every controller reconstructs state on startup.
pub fn load_manager(log_path: &std::path::Path) -> Result<StreamControlManager, Error> {
    let records = crate::record_log::read_all(log_path)?;
    Ok(StreamControlManager::from_records(&records))
}
