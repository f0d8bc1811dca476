use std::path::PathBuf;

use serde::Deserialize;

use windowshop_auth_types::cookie::DEFAULT_ACCESS_TOKEN_MINUTES;
use windowshop_core::config::Config;

/// `DATABASE_URL` value that selects the in-process store.
pub const MEMORY_DATABASE_URL: &str = "memory://";

/// Storefront configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct StorefrontConfig {
    /// PostgreSQL connection URL, or `memory://`.
    pub database_url: String,
    /// HMAC secret for signing access tokens.
    pub jwt_secret: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Token lifetime and cookie Max-Age. Keep short: roles are read from the token.
    #[serde(default = "default_token_minutes")]
    pub access_token_minutes: u64,
    #[serde(default)]
    pub cookie_secure: bool,
    /// JSON bundle imported into empty collections at startup.
    #[serde(default)]
    pub seed_data_path: Option<PathBuf>,
}

impl Config for StorefrontConfig {}

impl StorefrontConfig {
    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}

fn default_port() -> u16 {
    8000
}

fn default_token_minutes() -> u64 {
    DEFAULT_ACCESS_TOKEN_MINUTES
}
