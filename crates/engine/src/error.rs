//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`Validation`] returned when a draft is rejected before reaching the store.
//! - [`InvalidType`] returned when a transaction type cannot be parsed.
//! - [`Database`] wrapping any failure of the underlying store, untranslated.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`InvalidType`]: EngineError::InvalidType
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid transaction: {0}")]
    Validation(String),
    #[error("\"{0}\" is not a transaction type!")]
    InvalidType(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::InvalidType(a), Self::InvalidType(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
