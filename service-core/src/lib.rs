//! service-core: shared HTTP service plumbing (configuration, errors,
//! observability and middleware).
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;

pub use axum;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tower_http;
pub use tracing;
