//! # nc-api
//!
//! The web routing and orchestration layer for NC News.

pub mod error;
pub mod handlers;
pub mod middleware;

use actix_web::{web, Resource};

pub use error::ApiError;
pub use handlers::AppState;

/// Configures the `/api` routes and the extractor error handlers.
///
/// # Developer Note
/// Every resource falls back to `handlers::not_found`, so a known path hit
/// with an unsupported method answers 404 like an unknown path does. The
/// binary (and the tests) also mount `not_found` as the app-wide default.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(
            web::scope("/api")
                .service(resource("/topics").route(web::get().to(handlers::get_topics)))
                .service(resource("/articles").route(web::get().to(handlers::get_articles)))
                .service(
                    resource("/articles/{article_id}")
                        .route(web::get().to(handlers::get_article))
                        .route(web::patch().to(handlers::patch_article_votes)),
                )
                .service(
                    resource("/articles/{article_id}/comments")
                        .route(web::get().to(handlers::get_article_comments))
                        .route(web::post().to(handlers::post_article_comment)),
                )
                .service(resource("/users").route(web::get().to(handlers::get_users)))
                .service(
                    resource("/comments/{comment_id}")
                        .route(web::delete().to(handlers::delete_comment)),
                ),
        );
}

fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::to(handlers::not_found))
}
