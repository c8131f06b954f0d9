//! In-memory `NewsRepo` doubles for the HTTP tests.
//!
//! `InMemoryNewsRepo::seeded()` holds the same rows as the Postgres fixture
//! in `nc-db-postgres/tests/fixtures/seed.sql`.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use nc_core::{
    AppError, Article, ArticleQuery, ArticleSummary, Comment, CommentView, NewComment, NewsRepo,
    Result, SortColumn, SortOrder, Topic, User,
};

#[derive(Default)]
struct Tables {
    topics: Vec<Topic>,
    users: Vec<User>,
    articles: Vec<Article>,
    comments: Vec<Comment>,
}

pub struct InMemoryNewsRepo {
    tables: Mutex<Tables>,
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

impl InMemoryNewsRepo {
    pub fn seeded() -> Self {
        let topics = [
            ("mitch", "The man, the Mitch, the legend"),
            ("cats", "Not dogs"),
            ("paper", "what books are made of"),
        ]
        .into_iter()
        .map(|(slug, description)| Topic { slug: slug.into(), description: description.into() })
        .collect();

        let users = [
            ("butter_bridge", "jonny"),
            ("icellusedkars", "sam"),
            ("rogersop", "paul"),
            ("lurker", "do_nothing"),
        ]
        .into_iter()
        .map(|(username, name)| User {
            username: username.into(),
            name: name.into(),
            avatar_url: format!("https://avatars.example.com/{username}.png"),
        })
        .collect();

        #[rustfmt::skip]
        let articles = [
            (1, "Living in the shadow of a great man", "mitch", "butter_bridge", "I find this existence challenging", at(2020, 7, 9, 20, 11), 100),
            (2, "Sony Vaio; or, The Laptop", "mitch", "icellusedkars", "Call me Mitchell.", at(2020, 10, 16, 5, 3), 0),
            (3, "Eight pug gifs that remind me of mitch", "mitch", "icellusedkars", "some gifs", at(2020, 11, 3, 9, 12), 0),
            (4, "Student SUES Mitch!", "mitch", "rogersop", "We all love Mitch and all his wonderful works.", at(2020, 5, 6, 1, 14), 0),
            (5, "UNCOVERED: catspiracy to bring down democracy", "cats", "rogersop", "Bastet walks amongst us, and the cats are taking arms!", at(2020, 8, 3, 13, 14), 0),
            (6, "A", "mitch", "icellusedkars", "Delicious tin of cat food", at(2020, 10, 18, 1, 0), 0),
            (7, "Z", "mitch", "icellusedkars", "I was hungry.", at(2020, 1, 7, 14, 8), 0),
            (8, "Does Mitch predate civilisation?", "mitch", "icellusedkars", "Archaeologists have uncovered a gigantic statue.", at(2020, 4, 17, 1, 8), 0),
            (9, "They're not exactly dogs, are they?", "mitch", "butter_bridge", "Well? Think about it.", at(2020, 6, 6, 9, 10), 0),
            (10, "Seven inspirational thought leaders from Manchester UK", "mitch", "rogersop", "Who are we kidding, there is only one, and it's Mitch!", at(2020, 5, 14, 4, 15), 0),
            (11, "Am I a cat?", "mitch", "icellusedkars", "Having run out of ideas for articles, I am staring at the wall blankly, like a cat.", at(2020, 1, 15, 22, 21), 0),
            (12, "Moustache", "mitch", "butter_bridge", "Have you seen the size of that thing?", at(2020, 10, 11, 11, 24), 0),
        ]
        .into_iter()
        .map(|(article_id, title, topic, author, body, created_at, votes)| Article {
            article_id,
            title: title.into(),
            topic: topic.into(),
            author: author.into(),
            body: body.into(),
            created_at,
            votes,
        })
        .collect();

        let comments = [
            (1, 9, "butter_bridge", 16, at(2020, 4, 6, 12, 17)),
            (2, 1, "butter_bridge", 14, at(2020, 10, 31, 3, 3)),
            (3, 1, "icellusedkars", 100, at(2020, 3, 1, 1, 13)),
            (4, 1, "icellusedkars", -100, at(2020, 2, 23, 12, 1)),
            (5, 1, "icellusedkars", 0, at(2020, 11, 3, 21, 0)),
            (6, 1, "icellusedkars", 0, at(2020, 4, 11, 21, 2)),
            (7, 1, "icellusedkars", 0, at(2020, 5, 15, 20, 19)),
            (8, 1, "icellusedkars", 0, at(2020, 4, 14, 20, 19)),
            (9, 1, "icellusedkars", 0, at(2020, 1, 1, 3, 8)),
            (10, 3, "icellusedkars", 0, at(2020, 6, 20, 7, 24)),
            (11, 3, "icellusedkars", 0, at(2020, 9, 19, 23, 10)),
            (12, 1, "icellusedkars", 0, at(2020, 3, 2, 7, 10)),
            (13, 1, "icellusedkars", 0, at(2020, 6, 15, 10, 25)),
            (14, 5, "icellusedkars", 16, at(2020, 6, 9, 5, 0)),
            (15, 5, "butter_bridge", 1, at(2020, 11, 24, 0, 8)),
            (16, 6, "butter_bridge", 1, at(2020, 10, 11, 15, 23)),
            (17, 9, "icellusedkars", 20, at(2020, 3, 14, 17, 2)),
            (18, 1, "butter_bridge", 16, at(2020, 7, 21, 0, 20)),
        ]
        .into_iter()
        .map(|(comment_id, article_id, author, votes, created_at)| Comment {
            comment_id,
            article_id,
            author: author.into(),
            body: format!("comment {comment_id}"),
            votes,
            created_at,
        })
        .collect();

        Self {
            tables: Mutex::new(Tables { topics, users, articles, comments }),
        }
    }
}

fn compare(a: &ArticleSummary, b: &ArticleSummary, column: SortColumn) -> Ordering {
    let primary = match column {
        SortColumn::ArticleId => Ordering::Equal,
        SortColumn::CreatedAt => a.article.created_at.cmp(&b.article.created_at),
        SortColumn::Votes => a.article.votes.cmp(&b.article.votes),
        SortColumn::CommentCount => a.comment_count.cmp(&b.comment_count),
    };
    primary.then(a.article.article_id.cmp(&b.article.article_id))
}

#[async_trait]
impl NewsRepo for InMemoryNewsRepo {
    async fn list_topics(&self) -> Result<Vec<Topic>> {
        Ok(self.tables.lock().unwrap().topics.clone())
    }

    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<ArticleSummary>> {
        let tables = self.tables.lock().unwrap();
        if let Some(topic) = &query.topic {
            if !tables.topics.iter().any(|t| &t.slug == topic) {
                return Err(AppError::InvalidTopicQuery);
            }
        }
        let mut rows: Vec<ArticleSummary> = tables
            .articles
            .iter()
            .filter(|a| query.topic.as_ref().map_or(true, |topic| &a.topic == topic))
            .map(|a| ArticleSummary {
                article: a.clone(),
                comment_count: tables
                    .comments
                    .iter()
                    .filter(|c| c.article_id == a.article_id)
                    .count() as i32,
            })
            .collect();
        rows.sort_by(|a, b| {
            let ord = compare(a, b, query.sort_by);
            match query.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        Ok(rows)
    }

    async fn get_article(&self, article_id: i32) -> Result<Article> {
        let tables = self.tables.lock().unwrap();
        tables
            .articles
            .iter()
            .find(|a| a.article_id == article_id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn add_votes(&self, article_id: i32, inc_votes: i32) -> Result<Article> {
        let mut tables = self.tables.lock().unwrap();
        let article = tables
            .articles
            .iter_mut()
            .find(|a| a.article_id == article_id)
            .ok_or(AppError::NotFound)?;
        article.votes += inc_votes;
        Ok(article.clone())
    }

    async fn list_comments(&self, article_id: i32) -> Result<Vec<CommentView>> {
        let tables = self.tables.lock().unwrap();
        if !tables.articles.iter().any(|a| a.article_id == article_id) {
            return Err(AppError::ArticleNotFound);
        }
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| {
            b.created_at.cmp(&a.created_at).then(b.comment_id.cmp(&a.comment_id))
        });
        Ok(comments.into_iter().map(CommentView::from).collect())
    }

    async fn create_comment(&self, article_id: i32, comment: NewComment) -> Result<Comment> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.articles.iter().any(|a| a.article_id == article_id) {
            return Err(AppError::UnknownReference("comments_article_id_fkey".into()));
        }
        if !tables.users.iter().any(|u| u.username == comment.username) {
            return Err(AppError::UnknownAuthor);
        }
        let comment_id = tables.comments.iter().map(|c| c.comment_id).max().unwrap_or(0) + 1;
        let row = Comment {
            comment_id,
            article_id,
            author: comment.username,
            body: comment.body,
            votes: 0,
            created_at: Utc::now(),
        };
        tables.comments.push(row.clone());
        Ok(row)
    }

    async fn delete_comment(&self, comment_id: i32) -> Result<()> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.comments.len();
        tables.comments.retain(|c| c.comment_id != comment_id);
        if tables.comments.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.tables.lock().unwrap().users.clone())
    }
}

/// A store that is always down.
pub struct UnreachableRepo;

#[async_trait]
impl NewsRepo for UnreachableRepo {
    async fn list_topics(&self) -> Result<Vec<Topic>> {
        Err(AppError::Internal("pool timed out".into()))
    }
    async fn list_articles(&self, _: &ArticleQuery) -> Result<Vec<ArticleSummary>> {
        Err(AppError::Internal("pool timed out".into()))
    }
    async fn get_article(&self, _: i32) -> Result<Article> {
        Err(AppError::Internal("pool timed out".into()))
    }
    async fn add_votes(&self, _: i32, _: i32) -> Result<Article> {
        Err(AppError::Internal("pool timed out".into()))
    }
    async fn list_comments(&self, _: i32) -> Result<Vec<CommentView>> {
        Err(AppError::Internal("pool timed out".into()))
    }
    async fn create_comment(&self, _: i32, _: NewComment) -> Result<Comment> {
        Err(AppError::Internal("pool timed out".into()))
    }
    async fn delete_comment(&self, _: i32) -> Result<()> {
        Err(AppError::Internal("pool timed out".into()))
    }
    async fn list_users(&self) -> Result<Vec<User>> {
        Err(AppError::Internal("pool timed out".into()))
    }
}

/// Builds the app the way the binary does, minus the middleware.
macro_rules! test_app {
    ($repo:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(nc_api::AppState::new($repo)))
                .configure(nc_api::configure_routes)
                .default_service(actix_web::web::to(nc_api::handlers::not_found)),
        )
        .await
    };
}
