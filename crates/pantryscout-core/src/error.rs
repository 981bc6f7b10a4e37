use chrono::NaiveDate;
use thiserror::Error;

use crate::models::ItemStatus;

/// All the ways the analytics engine can refuse its input
///
/// Division by zero is deliberately absent: an empty inventory or a recipe
/// with no ingredients is ordinary data and resolves to a score of 0.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid report period: end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Cannot move '{name}' from {from} to {to}")]
    InvalidTransition {
        name: String,
        from: ItemStatus,
        to: ItemStatus,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
