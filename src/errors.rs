//! Unified error type for the transfer marketplace.
//!
//! Every failure path surfaces a distinct variant so callers (typically an HTTP layer)
//! can map them to their own status codes without string matching.

use thiserror::Error;

/// Errors returned by the marketplace engine and its storage layer.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced record does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of record that was looked up (e.g. `"player"`, `"transfer"`)
        entity: &'static str,
        /// Identifier used for the lookup
        id: i64,
    },

    /// The acting user neither owns the resource nor is an admin
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable reason
        message: String,
    },

    /// The player already has an open transfer listing
    #[error("Player {player_id} already has an open transfer")]
    Conflict {
        /// Player whose listing already exists
        player_id: i64,
    },

    /// The request is well-formed but not allowed, e.g. buying your own player
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Human-readable reason
        message: String,
    },

    /// The buying team cannot afford the asking price
    #[error("Team does not have enough money to execute the purchase ({budget} < {ask})")]
    InsufficientFunds {
        /// Buyer's budget at the time of the check
        budget: i64,
        /// Asking price of the listing
        ask: i64,
    },

    /// A write inside a transactional mutation failed; nothing was applied
    #[error("Internal failure: {message}")]
    InternalFailure {
        /// Description of the failed step
        message: String,
    },

    /// A monetary amount was negative
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: i64,
    },

    /// A player's age was negative
    #[error("Invalid age: {age}")]
    InvalidAge {
        /// The rejected age
        age: i32,
    },

    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// Storage failure outside of a transactional mutation
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl Error {
    /// Builds an [`Error::InternalFailure`] from a storage error raised mid-transaction.
    pub(crate) fn internal(step: &str, err: &sea_orm::DbErr) -> Self {
        Self::InternalFailure {
            message: format!("{step}: {err}"),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
