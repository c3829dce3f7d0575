use discflow_types::{InternalId, PlayerId, Side};
use std::fmt;

/// Result type for discflow-feed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while turning a payload into event streams
#[derive(Debug)]
pub enum Error {
    /// Payload or embedded event text is not valid JSON
    Json(serde_json::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Directory traversal failed
    WalkDir(walkdir::Error),

    /// An event tag outside the registry. Fatal for the game.
    UnknownEventCode { side: Side, index: usize, code: i64 },

    /// Two roster entries map the same internal id to different players
    DuplicateInternalId {
        id: InternalId,
        first: PlayerId,
        second: PlayerId,
    },

    /// Payload is well-formed JSON but misses a required part
    Payload(String),

    /// Game id cannot be used to address a payload
    InvalidGameId(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::WalkDir(err) => write!(f, "Directory traversal error: {}", err),
            Error::UnknownEventCode { side, index, code } => write!(
                f,
                "Unknown event code {} at {} event #{}",
                code, side, index
            ),
            Error::DuplicateInternalId { id, first, second } => write!(
                f,
                "Internal id {} maps to both {} and {}",
                id, first, second
            ),
            Error::Payload(msg) => write!(f, "Malformed payload: {}", msg),
            Error::InvalidGameId(id) => write!(f, "Invalid game id: {}", id),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::UnknownEventCode { .. }
            | Error::DuplicateInternalId { .. }
            | Error::Payload(_)
            | Error::InvalidGameId(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDir(err)
    }
}
