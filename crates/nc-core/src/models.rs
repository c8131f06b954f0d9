//! # Domain Models
//!
//! Plain records returned by the data-access layer. Field names are the
//! wire names: every struct serializes straight into a response envelope.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// A subject area articles are filed under (e.g. "mitch", "cats").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique identifier, also what `Article::topic` refers to.
    pub slug: String,
    pub description: String,
}

/// A full article row. Single-article fetches return this without a
/// `comment_count`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub article_id: i32,
    pub title: String,
    pub topic: String,
    pub author: String,
    pub body: String,
    #[serde(serialize_with = "serialize_date")]
    pub created_at: DateTime<Utc>,
    pub votes: i32,
}

/// An article as it appears in the listing, with its computed comment count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleSummary {
    #[serde(flatten)]
    pub article: Article,
    /// Zero when the article has no comments, never null.
    pub comment_count: i32,
}

/// A full comment row, as returned after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub comment_id: i32,
    pub article_id: i32,
    pub author: String,
    pub body: String,
    pub votes: i32,
    #[serde(serialize_with = "serialize_date")]
    pub created_at: DateTime<Utc>,
}

/// Projection used when listing the comments of one article.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentView {
    pub comment_id: i32,
    pub body: String,
    pub votes: i32,
    pub author: String,
    #[serde(serialize_with = "serialize_date")]
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        CommentView {
            comment_id: comment.comment_id,
            body: comment.body,
            votes: comment.votes,
            author: comment.author,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub name: String,
    pub avatar_url: String,
}

/// RFC 3339 with millisecond precision and a `Z` suffix,
/// e.g. `2020-07-09T20:11:00.000Z`.
pub fn serialize_date<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}
