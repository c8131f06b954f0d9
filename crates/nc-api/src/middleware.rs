//! nc-news/crates/nc-api/src/middleware.rs Middleware
//!
//! Standard middleware wrapped around the API by the binary.

use actix_cors::Cors;
use actix_web::middleware::Logger;

/// Returns the request logger for the NC News API.
pub fn standard_middleware() -> Logger {
    // remote-ip "request-line" status-code response-size "referrer" "user-agent" duration
    Logger::default()
}

// Browser front ends are served from a different origin.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_header()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE"])
        .max_age(3600)
}
