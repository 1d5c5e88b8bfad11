use thiserror::Error;

#[derive(Error, Debug)]
pub enum VckError {
    #[error("Project validation failed: {0}")]
    ProjectValidation(String),

    #[error("Manifest parsing failed: {0}")]
    ManifestParsing(String),

    #[error("Invalid version string: '{0}'")]
    InvalidVersion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VckError>;
