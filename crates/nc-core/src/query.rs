//! # Article listing query
//!
//! Validates the `topic` / `sort_by` / `order` query parameters and renders
//! the listing statement. Sort column and direction cannot be bound as
//! parameters, so they only ever reach the SQL text through the fixed
//! fragments below; the topic is always a bound `$1`.

use crate::error::{AppError, Result};

/// Columns the listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    ArticleId,
    #[default]
    CreatedAt,
    Votes,
    CommentCount,
}

impl SortColumn {
    pub const ALL: [SortColumn; 4] = [
        SortColumn::ArticleId,
        SortColumn::CreatedAt,
        SortColumn::Votes,
        SortColumn::CommentCount,
    ];

    /// Exact, case-sensitive match on the query-string name.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|col| col.name() == raw)
    }

    pub fn name(self) -> &'static str {
        match self {
            SortColumn::ArticleId => "article_id",
            SortColumn::CreatedAt => "created_at",
            SortColumn::Votes => "votes",
            SortColumn::CommentCount => "comment_count",
        }
    }

    fn sql(self) -> &'static str {
        match self {
            SortColumn::ArticleId => "articles.article_id",
            SortColumn::CreatedAt => "articles.created_at",
            SortColumn::Votes => "articles.votes",
            SortColumn::CommentCount => "comment_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Case-insensitive: `asc`, `ASC` and `Asc` are all accepted.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(SortOrder::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(SortOrder::Desc)
        } else {
            None
        }
    }

    fn sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// A validated listing request.
///
/// Construction checks `order` then `sort_by`. The topic can only be checked
/// against the store, so the repository does that before fetching any rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleQuery {
    pub topic: Option<String>,
    pub sort_by: SortColumn,
    pub order: SortOrder,
}

impl ArticleQuery {
    pub fn from_params(
        topic: Option<&str>,
        sort_by: Option<&str>,
        order: Option<&str>,
    ) -> Result<Self> {
        let order = match order {
            Some(raw) => SortOrder::parse(raw).ok_or(AppError::InvalidOrderQuery)?,
            None => SortOrder::default(),
        };
        let sort_by = match sort_by {
            Some(raw) => SortColumn::parse(raw).ok_or(AppError::InvalidSortByQuery)?,
            None => SortColumn::default(),
        };
        Ok(ArticleQuery {
            topic: topic.map(str::to_string),
            sort_by,
            order,
        })
    }

    /// Renders the listing statement. When a topic is set it is bound as `$1`.
    ///
    /// Rows tied on the sort column are ordered by `article_id` in the same
    /// direction.
    pub fn to_sql(&self) -> String {
        let mut sql = String::from(
            "SELECT articles.article_id, articles.title, articles.topic, articles.author, \
             articles.body, articles.created_at, articles.votes, \
             CAST(COUNT(comments.comment_id) AS INT) AS comment_count \
             FROM articles \
             LEFT JOIN comments ON comments.article_id = articles.article_id",
        );
        if self.topic.is_some() {
            sql.push_str(" WHERE articles.topic = $1");
        }
        sql.push_str(" GROUP BY articles.article_id");
        sql.push_str(" ORDER BY ");
        sql.push_str(self.sort_by.sql());
        sql.push(' ');
        sql.push_str(self.order.sql());
        if self.sort_by != SortColumn::ArticleId {
            sql.push_str(", articles.article_id ");
            sql.push_str(self.order.sql());
        }
        sql.push(';');
        sql
    }
}
