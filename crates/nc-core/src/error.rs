//! # AppError
//!
//! Centralized error handling for NC News.
//! Every failure a request can end in is one of these variants; each knows
//! the HTTP status and the public message it is reported with.

use thiserror::Error;

/// SQLSTATE codes the data-access layer knows how to classify.
pub mod sql_state {
    pub const INVALID_TEXT_REPRESENTATION: &str = "22P02";
    pub const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";
    pub const NOT_NULL_VIOLATION: &str = "23502";
    pub const FOREIGN_KEY_VIOLATION: &str = "23503";
}

/// The primary error type for all nc-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Path id is not a 32-bit integer.
    #[error("malformed id")]
    MalformedId,

    /// Request body field missing or of the wrong type.
    #[error("malformed request body")]
    MalformedBody,

    #[error("invalid order query")]
    InvalidOrderQuery,

    #[error("invalid sort_by query")]
    InvalidSortByQuery,

    #[error("invalid topic query")]
    InvalidTopicQuery,

    /// Article (by id) or comment (by id) does not exist.
    #[error("not found")]
    NotFound,

    /// Article missing while listing its comments.
    #[error("article not found")]
    ArticleNotFound,

    /// Insert referenced a username that is not in `users`.
    #[error("unknown author")]
    UnknownAuthor,

    /// Insert referenced some other missing row (usually the article).
    #[error("unknown reference: {0}")]
    UnknownReference(String),

    /// Infrastructure failure (e.g. DB down, unexpected SQLSTATE).
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> u16 {
        match self {
            AppError::MalformedId
            | AppError::MalformedBody
            | AppError::InvalidOrderQuery
            | AppError::InvalidSortByQuery
            | AppError::InvalidTopicQuery => 400,
            AppError::NotFound
            | AppError::ArticleNotFound
            | AppError::UnknownAuthor
            | AppError::UnknownReference(_) => 404,
            AppError::Internal(_) => 500,
        }
    }

    /// The text sent to the client. Internal detail never leaks here.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::MalformedId | AppError::MalformedBody => "Bad Request",
            AppError::InvalidOrderQuery => "Invalid order Query",
            AppError::InvalidSortByQuery => "Invalid sort_by Query",
            AppError::InvalidTopicQuery => "Invalid topic Query",
            AppError::NotFound | AppError::UnknownAuthor | AppError::UnknownReference(_) => {
                "Not Found"
            }
            AppError::ArticleNotFound => "Non Existent ID",
            AppError::Internal(_) => "Unhandled Server Error",
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, AppError::Internal(_))
    }

    /// Classifies a database failure by SQLSTATE.
    ///
    /// `constraint` is the violated constraint name when the driver reports one;
    /// it separates an unknown author from a missing article on comment insert.
    pub fn from_sql_state(code: Option<&str>, constraint: Option<&str>, detail: &str) -> Self {
        match code {
            Some(sql_state::INVALID_TEXT_REPRESENTATION)
            | Some(sql_state::NUMERIC_VALUE_OUT_OF_RANGE)
            | Some(sql_state::NOT_NULL_VIOLATION) => AppError::MalformedBody,
            Some(sql_state::FOREIGN_KEY_VIOLATION) => match constraint {
                Some(name) if name.contains("author") => AppError::UnknownAuthor,
                Some(name) => AppError::UnknownReference(name.to_string()),
                None => AppError::UnknownReference(detail.to_string()),
            },
            Some(other) => AppError::Internal(format!("SQLSTATE {other}: {detail}")),
            None => AppError::Internal(detail.to_string()),
        }
    }
}

/// A specialized Result type for NC News logic.
pub type Result<T> = std::result::Result<T, AppError>;
