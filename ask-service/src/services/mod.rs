pub mod metrics;
pub mod providers;

pub use providers::{AnswerProvider, ProviderError, ProviderMode};
