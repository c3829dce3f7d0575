use std::fmt;

/// Result type for discflow-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Event code is not present in the registry
    UnknownEventCode(i64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownEventCode(code) => write!(f, "Unknown event code: {}", code),
        }
    }
}

impl std::error::Error for Error {}
