/// An error type for tracking sessions.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The configuration requests a capability the device does not have.
    #[error("Unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    /// The operation requires a running session.
    #[error("Session is not running")]
    NotRunning,

    /// Playback was requested without any pose to play.
    #[error("Playback needs at least one pose")]
    EmptyPlayback,

    /// The session failed and stopped tracking.
    #[error("Session failed: {0}")]
    Failed(String),
}

/// An error type for loading tracking configurations.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Error reading the configuration file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Error parsing the configuration.
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}
