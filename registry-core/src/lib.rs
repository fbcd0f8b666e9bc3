//! registry-core: Shared infrastructure for the registry console.
pub mod api;
pub mod error;
pub mod middleware;
pub mod observability;

pub use axum;
pub use reqwest;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;
