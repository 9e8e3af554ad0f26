// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for segment, escape and URI operations.

use std::collections::TryReserveError;
use std::fmt;

/// The category of failure reported by an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A caller-supplied argument violates the operation's contract.
    InvalidInput,
    /// Delimited input contains an empty segment.
    MalformedInput,
    /// The output buffer could not be allocated.
    OutOfMemory,
    /// A string could not be parsed as a URI.
    UriParse,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InvalidInput => "invalid input",
            Self::MalformedInput => "malformed input",
            Self::OutOfMemory => "out of memory",
            Self::UriParse => "URI parse error",
        })
    }
}

/// An error from a `pathtag` operation.
///
/// The [`kind`](Error::kind) tells the caller what went wrong; the underlying cause,
/// when there is one, is available through [`std::error::Error::source`].
///
/// # Example
///
/// ```
/// use pathtag::{ErrorKind, split};
///
/// let err = split("a,,b", ',').unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::MalformedInput);
/// ```
#[ohno::error]
#[display("{kind}")]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub(crate) fn malformed(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(ErrorKind::MalformedInput, cause)
    }
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Self {
        Self::caused_by(ErrorKind::OutOfMemory, err)
    }
}

#[cfg(feature = "url")]
impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::caused_by(ErrorKind::UriParse, err)
    }
}

/// A specialized [`Result`](std::result::Result) type for `pathtag` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Allocates an empty string able to hold `capacity` bytes, reporting allocation
/// failure as [`ErrorKind::OutOfMemory`] instead of aborting.
pub(crate) fn try_string(capacity: usize) -> Result<String> {
    let mut s = String::new();
    s.try_reserve_exact(capacity)?;
    Ok(s)
}
