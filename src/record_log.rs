// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

//! Newline-delimited JSON encoding of the record log. One `Record` per
//! line, in append order. This is a CLI-only concern; `streamctl_core`
//! never touches a file.

use base::{Error, ResultExt};
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use streamctl_core::Record;

/// Reads every record in `path`, in order. A missing file is treated as
/// an empty log (nothing has been committed yet).
pub fn read_all(path: &Path) -> Result<Vec<Record>, Error> {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(base::err!(Internal, source(e))),
    };
    let mut records = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.err_kind(base::ErrorKind::Internal)?;
        if line.trim().is_empty() {
            continue;
        }
        let record: Record = serde_json::from_str(&line).err_kind(base::ErrorKind::DataLoss)?;
        records.push(record);
    }
    Ok(records)
}

/// Appends `records` to `path`, creating it if necessary.
pub fn append(path: &Path, records: &[Record]) -> Result<(), Error> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .err_kind(base::ErrorKind::Internal)?;
    for record in records {
        let line = serde_json::to_string(record).err_kind(base::ErrorKind::Internal)?;
        writeln!(file, "{line}").err_kind(base::ErrorKind::Internal)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamctl_core::ids::StreamId;
    use streamctl_core::{AssignedStreamIdRecord, S3StreamRecord};

    #[test]
    fn missing_log_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let records = read_all(&dir.path().join("nonexistent.log")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn append_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streamctl.log");
        let records = vec![
            Record::AssignedStreamId(AssignedStreamIdRecord {
                next_assigned_stream_id: StreamId(1),
            }),
            Record::S3Stream(S3StreamRecord {
                stream_id: StreamId(0),
                epoch: streamctl_core::ids::Epoch::ZERO,
                current_range_index: None,
                start_offset: streamctl_core::ids::Offset::ZERO,
            }),
        ];
        append(&path, &records).unwrap();
        assert_eq!(read_all(&path).unwrap(), records);
    }
}
