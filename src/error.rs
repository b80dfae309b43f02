use thiserror::Error;

/// Errors raised by profile, locator and configuration operations
#[derive(Error, Debug)]
pub enum MenvError {
    #[error("profile {0} already exists")]
    AlreadyExists(String),

    #[error("could not find {0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidConfig(String),

    #[error(
        "invalid profile name '{0}': only alphanumeric characters, hyphens (-) and underscores (_) are allowed"
    )]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MenvError>;
