use discflow_types::{EventKind, Side};
use std::fmt;

/// Result type for discflow-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during reconstruction
///
/// Only `Feed` escapes a game parse; the cursor errors are turned into
/// diagnostics by the point driver.
#[derive(Debug)]
pub enum Error {
    /// A side's point segment has no events left
    StreamExhausted(Side),

    /// Neither side opens the point with an interpretable line-set
    AmbiguousPointStart {
        home: Option<EventKind>,
        away: Option<EventKind>,
    },

    /// Payload could not be corrected or decoded
    Feed(discflow_feed::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::StreamExhausted(side) => write!(f, "{} stream exhausted", side),
            Error::AmbiguousPointStart { home, away } => write!(
                f,
                "Ambiguous point start (home: {}, away: {})",
                home.map(EventKind::name).unwrap_or("none"),
                away.map(EventKind::name).unwrap_or("none")
            ),
            Error::Feed(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Feed(err) => Some(err),
            Error::StreamExhausted(_) | Error::AmbiguousPointStart { .. } => None,
        }
    }
}

impl From<discflow_feed::Error> for Error {
    fn from(err: discflow_feed::Error) -> Self {
        Error::Feed(err)
    }
}
