//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

use streettalk_core::entities::MAX_REPLY_DEPTH_LIMIT;
use streettalk_core::FeedSort;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub feed: FeedConfig,
    pub emoji: EmojiConfig,
    pub content: ContentConfig,
    pub media: MediaConfig,
    pub identity: IdentityConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

/// Realtime feed settings
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Root path of the feed tree
    #[serde(default = "default_feed_topic")]
    pub topic: String,
    /// Number of most recent top-level posts kept in a subscription
    #[serde(default = "default_feed_limit")]
    pub limit: usize,
    #[serde(default = "default_max_reply_depth")]
    pub max_reply_depth: usize,
    #[serde(default)]
    pub default_sort: FeedSort,
}

/// Emoji index settings
#[derive(Debug, Clone, Deserialize)]
pub struct EmojiConfig {
    /// JSON dataset to build the index from; the bundled dataset is used when unset
    pub dataset_path: Option<String>,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

/// Content rendering settings
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Maximum characters in a post or reply
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// Initialize the HTML sanitizer at startup
    #[serde(default = "default_true")]
    pub sanitizer_enabled: bool,
}

/// Attachment settings
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: u32,
}

impl MediaConfig {
    #[must_use]
    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb as usize * 1024 * 1024
    }
}

/// Viewer identity (what the browser kept in local storage)
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Stable user id; a fresh one is generated when unset
    pub user_id: Option<String>,
    #[serde(default = "default_display_name")]
    pub display_name: String,
    #[serde(default)]
    pub avatar: String,
}

// Default value functions
fn default_app_name() -> String {
    "streettalk".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_feed_topic() -> String {
    "shouts".to_string()
}

fn default_feed_limit() -> usize {
    50
}

fn default_max_reply_depth() -> usize {
    streettalk_core::entities::DEFAULT_MAX_DEPTH
}

fn default_suggestion_limit() -> usize {
    12
}

fn default_max_length() -> usize {
    4000
}

fn default_true() -> bool {
    true
}

fn default_max_file_size() -> u32 {
    10
}

fn default_display_name() -> String {
    streettalk_core::entities::DEFAULT_DISPLAY_NAME.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: default_env(),
            },
            feed: FeedConfig {
                topic: default_feed_topic(),
                limit: default_feed_limit(),
                max_reply_depth: default_max_reply_depth(),
                default_sort: FeedSort::default(),
            },
            emoji: EmojiConfig {
                dataset_path: None,
                suggestion_limit: default_suggestion_limit(),
            },
            content: ContentConfig {
                max_length: default_max_length(),
                sanitizer_enabled: default_true(),
            },
            media: MediaConfig {
                max_file_size_mb: default_max_file_size(),
            },
            identity: IdentityConfig {
                user_id: None,
                display_name: default_display_name(),
                avatar: String::new(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to a value that cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error for unparsable values and for a reply depth above
    /// [`MAX_REPLY_DEPTH_LIMIT`]
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let max_reply_depth: usize =
            parse_or(&lookup, "FEED_MAX_REPLY_DEPTH", default_max_reply_depth)?;
        if max_reply_depth > MAX_REPLY_DEPTH_LIMIT {
            return Err(ConfigError::InvalidValue(
                "FEED_MAX_REPLY_DEPTH",
                format!("{max_reply_depth} (at most {MAX_REPLY_DEPTH_LIMIT})"),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: non_empty("APP_NAME").unwrap_or_else(default_app_name),
                env: parse_or(&lookup, "APP_ENV", default_env)?,
            },
            feed: FeedConfig {
                topic: non_empty("FEED_TOPIC").unwrap_or_else(default_feed_topic),
                limit: parse_or(&lookup, "FEED_LIMIT", default_feed_limit)?,
                max_reply_depth,
                default_sort: parse_or(&lookup, "FEED_DEFAULT_SORT", FeedSort::default)?,
            },
            emoji: EmojiConfig {
                dataset_path: non_empty("EMOJI_DATASET_PATH"),
                suggestion_limit: parse_or(
                    &lookup,
                    "EMOJI_SUGGESTION_LIMIT",
                    default_suggestion_limit,
                )?,
            },
            content: ContentConfig {
                max_length: parse_or(&lookup, "CONTENT_MAX_LENGTH", default_max_length)?,
                sanitizer_enabled: parse_or(&lookup, "CONTENT_SANITIZER_ENABLED", default_true)?,
            },
            media: MediaConfig {
                max_file_size_mb: parse_or(&lookup, "MEDIA_MAX_FILE_SIZE_MB", default_max_file_size)?,
            },
            identity: IdentityConfig {
                user_id: non_empty("ST_ID"),
                display_name: non_empty("ST_NAME").unwrap_or_else(default_display_name),
                avatar: lookup("ST_AVATAR").unwrap_or_default(),
            },
        })
    }
}

/// Parse `key` if set, otherwise fall back to `default`
fn parse_or<F, T, D>(lookup: &F, key: &'static str, default: D) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    D: FnOnce() -> T,
{
    match lookup(key).filter(|s| !s.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
