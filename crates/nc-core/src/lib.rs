//! nc-news/crates/nc-core/src/lib.rs
//!
//! The central domain logic and interface definitions for NC News.

pub mod error;
pub mod input;
pub mod models;
pub mod query;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use input::*;
pub use models::*;
pub use query::*;
pub use traits::*;
