//! Error types for the diagnostic store.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors from store creation, flushing, or reading.
#[derive(Debug)]
pub enum StoreError {
    /// An I/O error occurred during write or read.
    Io(io::Error),
    /// The store file could not be created at the given path.
    ///
    /// Fatal at startup: the simulation must not proceed silently
    /// without output.
    Create {
        /// Target path of the store.
        path: PathBuf,
        /// The underlying I/O failure.
        source: io::Error,
    },
    /// The store was already flushed and closed; a second flush is a
    /// defensive no-op error, not a fatal one.
    AlreadyClosed,
    /// The file does not start with the expected `b"MOTT"` magic bytes.
    InvalidMagic,
    /// The format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the file.
        found: u8,
    },
    /// The store could not be decoded (truncated or corrupt data).
    MalformedStore {
        /// Human-readable description of what went wrong.
        detail: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Create { path, source } => {
                write!(f, "cannot create store at '{}': {source}", path.display())
            }
            Self::AlreadyClosed => write!(f, "store already flushed and closed"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"MOTT\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
            Self::MalformedStore { detail } => write!(f, "malformed store: {detail}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Create { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
