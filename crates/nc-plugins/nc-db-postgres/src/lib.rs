//! # nc-db-postgres Implementation
//!
//! This module implements the data mapping between the Postgres relational
//! model and the `nc-core` domain models.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use nc_core::error::{AppError, Result};
use nc_core::input::NewComment;
use nc_core::models::{Article, ArticleSummary, Comment, CommentView, Topic, User};
use nc_core::query::ArticleQuery;
use nc_core::traits::NewsRepo;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

/// Schema shipped with the crate, applied by `PgNewsRepo::migrate`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../../migrations");

pub struct PgNewsRepo {
    pool: PgPool,
}

impl PgNewsRepo {
    /// Wraps an existing pool; the repo never builds its own global handle.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await
            .context("failed to connect to Postgres")?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .context("failed to apply migrations")?;
        Ok(())
    }
}

/// Classifies driver failures. Anything without a known SQLSTATE is internal.
fn translate(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => AppError::from_sql_state(
            db_err.code().as_deref(),
            db_err.constraint(),
            db_err.message(),
        ),
        _ => AppError::Internal(err.to_string()),
    }
}

// Row mappers

fn topic_from_row(row: &PgRow) -> std::result::Result<Topic, sqlx::Error> {
    Ok(Topic {
        slug: row.try_get("slug")?,
        description: row.try_get("description")?,
    })
}

fn user_from_row(row: &PgRow) -> std::result::Result<User, sqlx::Error> {
    Ok(User {
        username: row.try_get("username")?,
        name: row.try_get("name")?,
        avatar_url: row.try_get("avatar_url")?,
    })
}

fn article_from_row(row: &PgRow) -> std::result::Result<Article, sqlx::Error> {
    Ok(Article {
        article_id: row.try_get("article_id")?,
        title: row.try_get("title")?,
        topic: row.try_get("topic")?,
        author: row.try_get("author")?,
        body: row.try_get("body")?,
        created_at: row.try_get("created_at")?,
        votes: row.try_get("votes")?,
    })
}

fn summary_from_row(row: &PgRow) -> std::result::Result<ArticleSummary, sqlx::Error> {
    Ok(ArticleSummary {
        article: article_from_row(row)?,
        comment_count: row.try_get("comment_count")?,
    })
}

fn comment_from_row(row: &PgRow) -> std::result::Result<Comment, sqlx::Error> {
    Ok(Comment {
        comment_id: row.try_get("comment_id")?,
        article_id: row.try_get("article_id")?,
        author: row.try_get("author")?,
        body: row.try_get("body")?,
        votes: row.try_get("votes")?,
        created_at: row.try_get("created_at")?,
    })
}

fn comment_view_from_row(row: &PgRow) -> std::result::Result<CommentView, sqlx::Error> {
    Ok(CommentView {
        comment_id: row.try_get("comment_id")?,
        body: row.try_get("body")?,
        votes: row.try_get("votes")?,
        author: row.try_get("author")?,
        created_at: row.try_get("created_at")?,
    })
}

fn map_rows<T>(
    rows: Vec<PgRow>,
    map: fn(&PgRow) -> std::result::Result<T, sqlx::Error>,
) -> Result<Vec<T>> {
    rows.iter().map(map).collect::<std::result::Result<_, _>>().map_err(translate)
}

const ARTICLE_COLUMNS: &str = "article_id, title, topic, author, body, created_at, votes";
const COMMENT_COLUMNS: &str = "comment_id, article_id, author, body, votes, created_at";

#[async_trait]
impl NewsRepo for PgNewsRepo {
    async fn list_topics(&self) -> Result<Vec<Topic>> {
        let rows = sqlx::query("SELECT slug, description FROM topics;")
            .fetch_all(&self.pool)
            .await
            .map_err(translate)?;

        map_rows(rows, topic_from_row)
    }

    /// Topic check and listing share one repeatable-read snapshot.
    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<ArticleSummary>> {
        let mut tx = self.pool.begin().await.map_err(translate)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY;")
            .execute(&mut *tx)
            .await
            .map_err(translate)?;

        if let Some(topic) = &query.topic {
            let known = sqlx::query("SELECT 1 FROM topics WHERE slug = $1;")
                .bind(topic)
                .fetch_optional(&mut *tx)
                .await
                .map_err(translate)?;
            if known.is_none() {
                log::debug!("rejecting article listing for unknown topic {topic:?}");
                return Err(AppError::InvalidTopicQuery);
            }
        }

        let sql = query.to_sql();
        let mut statement = sqlx::query(&sql);
        if let Some(topic) = &query.topic {
            statement = statement.bind(topic);
        }
        let rows = statement.fetch_all(&mut *tx).await.map_err(translate)?;
        tx.commit().await.map_err(translate)?;

        map_rows(rows, summary_from_row)
    }

    async fn get_article(&self, article_id: i32) -> Result<Article> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE article_id = $1;");
        let row = sqlx::query(&sql)
            .bind(article_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(translate)?
            .ok_or(AppError::NotFound)?;

        article_from_row(&row).map_err(translate)
    }

    async fn add_votes(&self, article_id: i32, inc_votes: i32) -> Result<Article> {
        let row = sqlx::query(&format!(
            "UPDATE articles SET votes = votes + $1 WHERE article_id = $2 RETURNING {ARTICLE_COLUMNS};"
        ))
        .bind(inc_votes)
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)?
        .ok_or(AppError::NotFound)?;

        article_from_row(&row).map_err(translate)
    }

    /// Existence check and listing share one repeatable-read snapshot.
    async fn list_comments(&self, article_id: i32) -> Result<Vec<CommentView>> {
        let mut tx = self.pool.begin().await.map_err(translate)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY;")
            .execute(&mut *tx)
            .await
            .map_err(translate)?;

        sqlx::query("SELECT 1 FROM articles WHERE article_id = $1;")
            .bind(article_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(translate)?
            .ok_or(AppError::ArticleNotFound)?;

        let rows = sqlx::query(
            "SELECT comment_id, body, votes, author, created_at FROM comments \
             WHERE article_id = $1 ORDER BY created_at DESC, comment_id DESC;",
        )
        .bind(article_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(translate)?;
        tx.commit().await.map_err(translate)?;

        map_rows(rows, comment_view_from_row)
    }

    async fn create_comment(&self, article_id: i32, comment: NewComment) -> Result<Comment> {
        let row = sqlx::query(&format!(
            "INSERT INTO comments (article_id, author, body) VALUES ($1, $2, $3) RETURNING {COMMENT_COLUMNS};"
        ))
        .bind(article_id)
        .bind(&comment.username)
        .bind(&comment.body)
        .fetch_one(&self.pool)
        .await
        .map_err(translate)?;

        comment_from_row(&row).map_err(translate)
    }

    async fn delete_comment(&self, comment_id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1;")
            .bind(comment_id)
            .execute(&self.pool)
            .await
            .map_err(translate)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query("SELECT username, name, avatar_url FROM users;")
            .fetch_all(&self.pool)
            .await
            .map_err(translate)?;

        map_rows(rows, user_from_row)
    }
}
