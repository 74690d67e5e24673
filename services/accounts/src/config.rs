use roster_core::config::Config;
use roster_domain::messages::Locale;
use serde::Deserialize;

/// Accounts service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct AccountsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port to listen on (default 3000). Env var: `ACCOUNTS_PORT`.
    #[serde(default = "default_port")]
    pub accounts_port: u16,
    /// HMAC secret for signing session tokens.
    pub session_secret: String,
    /// Cookie domain attribute (e.g. "example.com").
    pub cookie_domain: String,
    /// Language of validation messages (`ja` | `en`). Env var: `ACCOUNTS_LOCALE`.
    #[serde(default)]
    pub accounts_locale: Locale,
    #[serde(default = "default_confirmation_ttl_hours")]
    pub confirmation_ttl_hours: i64,
    #[serde(default = "default_reset_password_ttl_hours")]
    pub reset_password_ttl_hours: i64,
}

fn default_port() -> u16 {
    3000
}

fn default_confirmation_ttl_hours() -> i64 {
    72
}

fn default_reset_password_ttl_hours() -> i64 {
    6
}

impl Config for AccountsConfig {}
