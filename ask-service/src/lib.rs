//! HTTP relay that answers questions through Gemini, or with a canned
//! answer when no API key is configured.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState, Application};
