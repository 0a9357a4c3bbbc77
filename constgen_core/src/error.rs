use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConstgenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid regex pattern for {class}: {message}")]
    Regex { class: String, message: String },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("No constants matched for class {class} (strict mode)")]
    EmptyClass { class: String },
}

pub type Result<T> = std::result::Result<T, ConstgenError>;

impl ConstgenError {
    pub fn regex(class: impl Into<String>, err: regex::Error) -> Self {
        ConstgenError::Regex {
            class: class.into(),
            message: err.to_string(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ConstgenError::Config(message.into())
    }

    pub fn empty_class(class: impl Into<String>) -> Self {
        ConstgenError::EmptyClass {
            class: class.into(),
        }
    }
}
