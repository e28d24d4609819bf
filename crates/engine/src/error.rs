//! The module contains the error the engine can throw.
//!
//! The errors a caller is expected to branch on are:
//!
//! - [`InvalidCredentials`] thrown when a login does not match an account.
//!   Unknown usernames and wrong passwords are deliberately the same error.
//! - [`ExistingKey`] thrown when a registration collides with an existing
//!   username or email.
//! - [`Unauthorized`] thrown when a bearer token is missing, malformed or
//!   expired.
//!
//! Everything else is an internal failure.
//!
//!  [`InvalidCredentials`]: EngineError::InvalidCredentials
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`Unauthorized`]: EngineError::Unauthorized
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("invalid dataset: {0}")]
    Dataset(#[from] serde_json::Error),
    #[error("csv export failed: {0}")]
    Csv(String),
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("background task failed: {0}")]
    Task(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Unauthorized(a), Self::Unauthorized(b)) => a == b,
            (Self::Csv(a), Self::Csv(b)) => a == b,
            (Self::Task(a), Self::Task(b)) => a == b,
            (Self::Dataset(a), Self::Dataset(b)) => a.to_string() == b.to_string(),
            (Self::Hash(a), Self::Hash(b)) => a.to_string() == b.to_string(),
            (Self::Token(a), Self::Token(b)) => a.to_string() == b.to_string(),
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
