//! HTTP handlers for the ask service.

pub mod ask;
pub mod health;

pub use ask::ask;
pub use health::{health_check, method_not_allowed, metrics, not_found};
