mod app_config;
mod timeouts;

pub use app_config::{AppConfig, LlmConfig};
pub use timeouts::TimeoutConfig;
