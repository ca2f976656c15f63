// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

//! On-disk CLI configuration, loaded from an optional TOML file.
//!
//! The core library itself takes no configuration; everything here
//! configures the demo binary's view of the metadata log transport it
//! stands in for.

use base::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the newline-delimited JSON record log this CLI reads and
    /// appends to.
    pub log_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_path: PathBuf::from("streamctl.log"),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or returns the default if `path`
    /// doesn't exist.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(base::err!(Internal, source(e))),
        };
        toml::from_str(&text).map_err(|e| base::err!(InvalidArgument, source(e)))
    }
}
