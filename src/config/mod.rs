//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, FetchConfig, GenerationConfig, KeywordsConfig, LogFormat, LoggingConfig,
    ServerConfig,
};
