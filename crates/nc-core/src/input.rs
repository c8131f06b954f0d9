//! Request input validation: path ids and JSON bodies.
//!
//! Bodies arrive as raw `serde_json::Value` so a field of the wrong JSON type
//! is reported as `MalformedBody` rather than a generic deserialization error.

use serde_json::Value;

use crate::error::{AppError, Result};

/// Parses a path segment as a 32-bit row id.
pub fn parse_id(raw: &str) -> Result<i32> {
    raw.parse::<i32>().map_err(|_| AppError::MalformedId)
}

/// Body of `POST /api/articles/:article_id/comments`. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub username: String,
    pub body: String,
}

impl NewComment {
    pub fn from_json(value: &Value) -> Result<Self> {
        let fields = value.as_object().ok_or(AppError::MalformedBody)?;
        // body first: a non-string body is a 400 whoever the author is
        let body = fields
            .get("body")
            .and_then(Value::as_str)
            .ok_or(AppError::MalformedBody)?;
        let username = fields
            .get("username")
            .and_then(Value::as_str)
            .ok_or(AppError::MalformedBody)?;
        Ok(NewComment {
            username: username.to_string(),
            body: body.to_string(),
        })
    }
}

/// Body of `PATCH /api/articles/:article_id`: a relative vote change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteUpdate {
    pub inc_votes: i32,
}

impl VoteUpdate {
    pub fn from_json(value: &Value) -> Result<Self> {
        let inc_votes = value
            .get("inc_votes")
            .and_then(Value::as_i64)
            .and_then(|n| i32::try_from(n).ok())
            .ok_or(AppError::MalformedBody)?;
        Ok(VoteUpdate { inc_votes })
    }
}
