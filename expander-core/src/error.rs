use thiserror::Error;
use toml::de::Error as TomlError;
use std::io::Error as IoError;

/// Errors owned by the engine itself: bad construction options, or a leaf
/// reached without a consumer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("no consumer defined")]
    MissingConsumer,

    #[error("unknown configuration option(s): {}", .0.join(", "))]
    UnknownOptions(Vec<String>),

    #[error("option `{key}` expects a {expected} hook, got {found}")]
    HookMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("duplicate variant name: {0}")]
    DuplicateVariant(String),
}

#[derive(Error, Debug)]
pub enum ExpanderError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Settings parse error: {0}")]
    Settings(#[from] TomlError),

    #[error("IO error: {0}")]
    Io(#[from] IoError),

    #[error(transparent)]
    Hook(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ExpanderError>;
