use std::fmt;

/// Result type for discflow-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Payload discovery or decoding failed
    Feed(discflow_feed::Error),

    /// Reconstruction failed
    Engine(discflow_engine::Error),

    /// The worker pool could not be started
    WorkerPool(rayon::ThreadPoolBuildError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Feed(err) => write!(f, "Feed error: {}", err),
            Error::Engine(err) => write!(f, "Engine error: {}", err),
            Error::WorkerPool(err) => write!(f, "Worker pool error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Feed(err) => Some(err),
            Error::Engine(err) => Some(err),
            Error::WorkerPool(err) => Some(err),
            Error::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<discflow_feed::Error> for Error {
    fn from(err: discflow_feed::Error) -> Self {
        Error::Feed(err)
    }
}

impl From<discflow_engine::Error> for Error {
    fn from(err: discflow_engine::Error) -> Self {
        Error::Engine(err)
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Error::WorkerPool(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
