//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, ContentConfig, EmojiConfig, Environment, FeedConfig,
    IdentityConfig, MediaConfig,
};
