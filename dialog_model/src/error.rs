//! Errors raised while building or loading dialog models.

use crate::QName;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid qualified name: '{0}'")]
    InvalidQName(String),
    #[error("Duplicate interaction unit: {0}")]
    DuplicateUnit(QName),
    #[error("Unknown interaction unit: {0}")]
    UnknownUnit(QName),
    #[error("Scope model already has a root: {0}")]
    RootAlreadySet(QName),
    #[error("Invalid TOML dialog description: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid JSON dialog description: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;
