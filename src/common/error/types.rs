//! Unified error types for deckwright.
//!
//! Only the two fatal boundaries of a generation call surface here: a top-level
//! specification that cannot be read at all, and a writer output that cannot be
//! turned into a binary blob. Everything in between degrades in-band.
use thiserror::Error;

/// Main error type for deckwright operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The top-level specification could not be parsed or has the wrong shape
    #[error("Malformed specification: {0}")]
    MalformedSpec(String),

    /// The document writer returned a representation that has no binary form
    #[error("Unsupported document representation: {0}")]
    UnsupportedBlob(String),

    /// Package writer error
    #[error("OOXML error: {0}")]
    Ooxml(#[from] crate::ooxml::error::OoxmlError),

    /// The background serialization task died before producing output
    #[error("Serialization task failed: {0}")]
    Task(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedSpec(err.to_string())
    }
}

/// Result type for deckwright operations.
pub type Result<T> = std::result::Result<T, Error>;
