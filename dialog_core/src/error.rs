//! Recoverable errors of the dialog engine.
//!
//! Unknown units are a caller bug and panic in the regular lookups; the
//! `try_*` variants report them as [`DialogError::UnitNotFound`] instead.

use dialog_model::QName;

#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error("Unit not present in dialog: {0}")]
    UnitNotFound(QName),
    #[error("Address resolution failed: {0}")]
    Address(#[from] AddressError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Malformed address segment: '{0}'")]
    Malformed(String),
    #[error("Unresolved address token: '{0}'")]
    Unresolved(String),
    #[error("No value supplied for wildcard #{0}")]
    MissingWildcard(usize),
}

pub type DialogResult<T> = std::result::Result<T, DialogError>;
