//! # Core Traits (Ports)
//!
//! Any database plugin must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::error::Result;
use crate::input::NewComment;
use crate::models::{Article, ArticleSummary, Comment, CommentView, Topic, User};
use crate::query::ArticleQuery;

/// Data access contract for topics, articles, comments and users.
///
/// Implementations translate store failures into `AppError` before returning;
/// callers never see driver errors.
#[async_trait]
pub trait NewsRepo: Send + Sync {
    // Topic Operations
    async fn list_topics(&self) -> Result<Vec<Topic>>;

    // Article Operations

    /// Fails with `InvalidTopicQuery` when `query.topic` names no existing
    /// topic. That check happens before any article row is read.
    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<ArticleSummary>>;

    /// Fails with `NotFound`.
    async fn get_article(&self, article_id: i32) -> Result<Article>;

    /// Applies `votes = votes + inc_votes` atomically. Fails with `NotFound`.
    async fn add_votes(&self, article_id: i32, inc_votes: i32) -> Result<Article>;

    // Comment Operations

    /// Newest first. Fails with `ArticleNotFound`; an article without
    /// comments yields an empty list.
    async fn list_comments(&self, article_id: i32) -> Result<Vec<CommentView>>;

    /// Unknown author or article surface as `UnknownAuthor` / `UnknownReference`.
    async fn create_comment(&self, article_id: i32, comment: NewComment) -> Result<Comment>;

    /// Fails with `NotFound` when no comment has this id.
    async fn delete_comment(&self, comment_id: i32) -> Result<()>;

    // User Operations
    async fn list_users(&self) -> Result<Vec<User>>;
}
