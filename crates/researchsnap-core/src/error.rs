use thiserror::Error;

/// All errors that can occur in researchsnap-core.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unknown card layout: {0} (expected 'horizontal' or 'vertical')")]
    UnknownLayout(String),

    #[error("Unknown identifier kind: {0}")]
    UnknownIdentifierKind(String),

    #[error("Unknown config key: {0}")]
    UnknownConfigKey(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Failure exit codes shared by the binaries; success exits with 0.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    GeneralError = 1,
    InvalidArgs = 3,
    NetworkError = 6,
}

pub type Result<T> = std::result::Result<T, CoreError>;
