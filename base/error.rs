// This file is part of the Stream Control Manager.
// Copyright (C) 2026 The Stream Control Manager Authors; see AUTHORS and LICENSE.txt.
// SPDX-License-Identifier: GPL-3.0-or-later WITH GPL-3.0-linking-exception.

//! Error kind classification and the `err!`/`bail!` macros used throughout
//! this workspace: a typed kind plus an optional message and/or source
//! error, rather than an untyped `String`.

use std::error::Error as StdError;
use std::fmt;

/// Error kind.
///
/// These codes are taken from
/// [grpc::StatusCode](https://github.com/grpc/grpc/blob/0e00c430827e81d61e1e7164ef04ca21ccbfaa77/include/grpcpp/impl/codegen/status_code_enum.h),
/// a general-purpose classification that covers the ambient I/O/config
/// failures this workspace actually has. The stream-control state machine's
/// own precondition/soft-rejection failures are not `Error`s; see
/// `streamctl_core::manager`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    Unknown,
    InvalidArgument,
    NotFound,
    AlreadyExists,
    FailedPrecondition,
    OutOfRange,
    Internal,
    DataLoss,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Unknown => "unknown",
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::NotFound => "not found",
            ErrorKind::AlreadyExists => "already exists",
            ErrorKind::FailedPrecondition => "failed precondition",
            ErrorKind::OutOfRange => "out of range",
            ErrorKind::Internal => "internal",
            ErrorKind::DataLoss => "data loss",
        })
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    msg: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Error {
            kind,
            msg: Some(msg.into()),
            source: None,
        }
    }

    pub fn wrap(kind: ErrorKind, source: impl StdError + Send + Sync + 'static) -> Self {
        Error {
            kind,
            msg: None,
            source: Some(Box::new(source)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Renders this error followed by each `source()` in the chain, one per line.
    pub fn chain(&self) -> String {
        let mut out = self.to_string();
        let mut cur: Option<&(dyn StdError + 'static)> = StdError::source(self);
        while let Some(e) = cur {
            out.push_str("\ncaused by: ");
            out.push_str(&e.to_string());
            cur = e.source();
        }
        out
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.msg {
            Some(m) => write!(f, "{}: {}", self.kind, m),
            None => match &self.source {
                Some(s) => write!(f, "{}: {}", self.kind, s),
                None => write!(f, "{}", self.kind),
            },
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn StdError + 'static))
    }
}

/// Extension methods for `Result`, to attach an [`ErrorKind`] to a foreign error.
pub trait ResultExt<T> {
    fn err_kind(self, k: ErrorKind) -> Result<T, Error>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn err_kind(self, k: ErrorKind) -> Result<T, Error> {
        self.map_err(|e| Error::wrap(k, e))
    }
}

/// Builds an [`Error`] with the given kind.
///
/// ```
/// use streamctl_base::{err, ErrorKind};
/// let e = err!(NotFound, msg("no such stream {}", 4));
/// assert_eq!(e.kind(), ErrorKind::NotFound);
/// ```
#[macro_export]
macro_rules! err {
    ($kind:ident, msg($($arg:tt)+)) => {
        $crate::Error::new($crate::ErrorKind::$kind, format!($($arg)+))
    };
    ($kind:ident, source($e:expr)) => {
        $crate::Error::wrap($crate::ErrorKind::$kind, $e)
    };
}

/// Like [`err!`], but returns early.
#[macro_export]
macro_rules! bail {
    ($($t:tt)+) => {
        return Err($crate::err!($($t)+))
    };
}
