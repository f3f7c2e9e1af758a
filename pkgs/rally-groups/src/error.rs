//! Error taxonomy for group lifecycle operations
//!
//! Validation failures are raised before any store interaction. Store
//! failures are wrapped in [`GroupError::Persistence`] and the underlying
//! `DbErr` detail stays internal; the API layer maps each kind to a
//! caller-facing status without leaking store messages.

use sea_orm::DbErr;
use thiserror::Error;

/// Errors that can occur in group lifecycle operations
#[derive(Debug, Error)]
pub enum GroupError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("invite already used")]
    AlreadyUsed,

    #[error("invite expired")]
    Expired,

    #[error("storage error: {0}")]
    Persistence(#[from] DbErr),
}

/// Discriminant of [`GroupError`], used for status mapping and assertions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    AlreadyUsed,
    Expired,
    Persistence,
}

impl GroupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GroupError::Validation(_) => ErrorKind::Validation,
            GroupError::NotFound(_) => ErrorKind::NotFound,
            GroupError::AlreadyUsed => ErrorKind::AlreadyUsed,
            GroupError::Expired => ErrorKind::Expired,
            GroupError::Persistence(_) => ErrorKind::Persistence,
        }
    }
}
