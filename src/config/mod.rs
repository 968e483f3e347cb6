//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CacheSettings, DatabaseConfig, EmbeddingConfig, LogFormat, LoggingConfig,
    MetricsSettings, QueueConfig, RateLimitConfig, RerankConfig, ServerConfig,
};
