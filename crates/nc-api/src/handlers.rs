//! # nc-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the `NewsRepo`
//! port. Success bodies are envelopes keyed by the resource name.

use actix_web::{web, HttpResponse};
use nc_core::{parse_id, AppError, ArticleQuery, NewComment, NewsRepo, VoteUpdate};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ApiError, ErrorBody};

/// State shared across all Actix-web workers.
pub struct AppState {
    pub repo: Box<dyn NewsRepo>,
}

impl AppState {
    pub fn new(repo: impl NewsRepo + 'static) -> Self {
        Self { repo: Box::new(repo) }
    }
}

type HandlerResult = Result<HttpResponse, ApiError>;

/// `GET /api/topics`
pub async fn get_topics(data: web::Data<AppState>) -> HandlerResult {
    let topics = data.repo.list_topics().await?;
    Ok(HttpResponse::Ok().json(json!({ "topics": topics })))
}

/// Query string of `GET /api/articles`. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ArticleListParams {
    pub topic: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

/// `GET /api/articles?topic=&sort_by=&order=`
pub async fn get_articles(
    data: web::Data<AppState>,
    params: web::Query<ArticleListParams>,
) -> HandlerResult {
    let query = ArticleQuery::from_params(
        params.topic.as_deref(),
        params.sort_by.as_deref(),
        params.order.as_deref(),
    )?;
    let articles = data.repo.list_articles(&query).await?;
    Ok(HttpResponse::Ok().json(json!({ "articles": articles })))
}

/// `GET /api/articles/{article_id}`
pub async fn get_article(data: web::Data<AppState>, path: web::Path<String>) -> HandlerResult {
    let article_id = parse_id(&path)?;
    let article = data.repo.get_article(article_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "article": article })))
}

/// `PATCH /api/articles/{article_id}` with `{ "inc_votes": n }`
pub async fn patch_article_votes(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HandlerResult {
    let article_id = parse_id(&path)?;
    let update = VoteUpdate::from_json(&body)?;
    let article = data.repo.add_votes(article_id, update.inc_votes).await?;
    Ok(HttpResponse::Ok().json(json!({ "article": article })))
}

/// `GET /api/articles/{article_id}/comments`
pub async fn get_article_comments(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> HandlerResult {
    let article_id = parse_id(&path)?;
    let comments = data.repo.list_comments(article_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "comments": comments })))
}

/// `POST /api/articles/{article_id}/comments` with `{ "username", "body" }`
pub async fn post_article_comment(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> HandlerResult {
    let article_id = parse_id(&path)?;
    let new_comment = NewComment::from_json(&body)?;
    let comment = data.repo.create_comment(article_id, new_comment).await?;
    Ok(HttpResponse::Created().json(json!({ "comment": comment })))
}

/// `GET /api/users`
pub async fn get_users(data: web::Data<AppState>) -> HandlerResult {
    let users = data.repo.list_users().await?;
    Ok(HttpResponse::Ok().json(json!({ "users": users })))
}

/// `DELETE /api/comments/{comment_id}`. A missing comment is a 404.
pub async fn delete_comment(data: web::Data<AppState>, path: web::Path<String>) -> HandlerResult {
    let comment_id = parse_id(&path)?;
    data.repo.delete_comment(comment_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Fallback for any unmatched route or method.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody {
        message: AppError::NotFound.public_message(),
    })
}
