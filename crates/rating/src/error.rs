use std::fmt;
use std::time::Duration;

/// Why a provider came back empty. Logged, then collapsed to "absent".
#[derive(Debug)]
pub enum FetchError {
    /// Network / connection error
    Network(String),
    /// HTTP error with status code
    Http(u16),
    /// Attempt ran past its deadline
    Timeout(Duration),
    /// Browser process failed or produced nothing
    Browser(String),
    /// Response body unusable
    Parse(String),
    /// Local I/O (temp profile, DOM file)
    Io(String),
    /// HTTP client could not be constructed
    Client(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http(code) => write!(f, "HTTP {code}"),
            Self::Timeout(after) => write!(f, "timed out after {}ms", after.as_millis()),
            Self::Browser(msg) => write!(f, "browser error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Client(msg) => write!(f, "HTTP client error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

/// Persisting a cache partition failed. Never fatal to a resolution.
#[derive(Debug)]
pub enum CacheError {
    Io { path: String, message: String },
    Serialize(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "cache IO error at {path}: {message}"),
            Self::Serialize(msg) => write!(f, "cache serialize error: {msg}"),
        }
    }
}

impl std::error::Error for CacheError {}
