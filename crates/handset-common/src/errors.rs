use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Rejections produced by the security gate. Never fatal: the caller
/// receives the error, logs it, and replies with an explicit failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecurityError {
    #[error("url rejected: {0}")]
    InvalidUrl(String),

    #[error("host is blocked: {0}")]
    BlockedHost(String),

    #[error("unauthorized sender: {0}")]
    UnauthorizedSender(String),

    #[error("command not permitted from content surface: {0}")]
    ContentOrigin(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("surface backend error: {0}")]
    Backend(String),

    #[error("no such tab: {0}")]
    UnknownTab(u32),

    #[error("no active tab")]
    NoActiveTab,

    #[error("no host window")]
    NoWindow,

    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Disk read/write failures. The in-memory state keeps working.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed data in {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum HandsetError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Security(#[from] SecurityError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("{0}")]
    Other(String),
}
