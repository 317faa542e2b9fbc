//! Unified error types and result handling.
//!
//! Domain errors (validation, balance, lookup) are struct variants so callers can
//! match on the offending values. Infrastructure errors convert via `#[from]`.

use thiserror::Error;

/// Every failure the tracker, its storage, or the Discord front end can report.
#[derive(Debug, Error)]
pub enum Error {
    /// A required field is missing, empty, or not positive
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// Transaction amount is zero, negative, or would overflow the balance
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: i64,
    },

    /// Withdrawal larger than the collected balance
    #[error("Insufficient funds: {available} available, {requested} requested")]
    InsufficientFunds {
        /// Balance currently collected
        available: u64,
        /// Amount the withdrawal asked for
        requested: u64,
    },

    /// No record carries this id
    #[error("Savings record not found: {id}")]
    RecordNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// A transaction or toggle was requested while no record is open
    #[error("No savings record is open")]
    NoRecordOpen,

    /// Writing the collection to durable storage failed
    #[error("Storage error: {message}")]
    Storage {
        /// Underlying cause, already rendered
        message: String,
    },

    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Stored collection could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Writing a response into a `String` buffer failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
