//! Error types for statistics stream sessions.
//!
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations. Collaborator errors (container, codec) are converted to
//! strings at the boundary so their types never appear on the public surface.

use std::io;
use thiserror::Error;

/// Result type alias for stream operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for statistics stream sessions.
///
/// All variants are fatal to the session that raised them: nothing is
/// retried internally, and no partial-success mode exists.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (source/destination cannot be opened, written, or read)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Container library rejected an operation (summary read, channel or
    /// schema registration, message append)
    #[error("container error: {0}")]
    Container(String),

    /// Payload could not be encoded or decoded as CDR
    #[error("encoding error: {0}")]
    Codec(String),

    /// The container declares no channel for the expected topic
    #[error("no channel with topic {0:?} in container")]
    MissingChannel(String),

    /// A values record references a version tag never announced on the
    /// names channel; the stream is malformed or truncated
    #[error("values record references names version {version} never announced on the names channel")]
    UnknownVersion {
        /// Version tag carried by the offending values record
        version: u32,
    },

    /// A names record reuses a version tag already bound to different
    /// label content
    #[error("names version {version} re-announced with different labels")]
    VersionConflict {
        /// Version tag that was re-announced
        version: u32,
    },
}

impl From<mcap::McapError> for Error {
    fn from(e: mcap::McapError) -> Self {
        Error::Container(e.to_string())
    }
}

impl From<cdr::Error> for Error {
    fn from(e: cdr::Error) -> Self {
        Error::Codec(e.to_string())
    }
}
