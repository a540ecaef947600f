use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read.
    Io(String),
    /// JSON settings could not be parsed.
    Json(String),
    /// TOML settings could not be parsed.
    Toml(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Json(msg) => write!(f, "settings.json parse error: {msg}"),
            Self::Toml(msg) => write!(f, "TOML parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
