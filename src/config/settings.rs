//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME, DEFAULT_CATALOG_API_URL,
};
use crate::domain::Password;
use crate::errors::StoreResult;

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub catalog_api_url: String,
    pub admin_username: String,
    admin_password_hash: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("catalog_api_url", &self.catalog_api_url)
            .field("admin_username", &self.admin_username)
            .field("admin_password_hash", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// The admin password is hashed at load time so the clear text never
    /// lives beyond this call.
    pub fn from_env() -> StoreResult<Self> {
        dotenvy::dotenv().ok();

        let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
            tracing::warn!("ADMIN_PASSWORD not set, using insecure default for development");
            DEFAULT_ADMIN_PASSWORD.to_string()
        });

        Self::new(
            env::var("CATALOG_API_URL").unwrap_or_else(|_| DEFAULT_CATALOG_API_URL.to_string()),
            env::var("ADMIN_USERNAME").unwrap_or_else(|_| DEFAULT_ADMIN_USERNAME.to_string()),
            &admin_password,
        )
    }

    /// Build a configuration from explicit values (used by tests and embedders)
    pub fn new(
        catalog_api_url: String,
        admin_username: String,
        admin_password: &str,
    ) -> StoreResult<Self> {
        let admin_password_hash = Password::new(admin_password)?.into_string();
        Ok(Self {
            catalog_api_url,
            admin_username,
            admin_password_hash,
        })
    }

    /// Verify admin credentials against the configured username and hash
    pub fn verify_admin(&self, username: &str, password: &str) -> bool {
        let password_ok = Password::from_hash(self.admin_password_hash.clone()).verify(password);
        username == self.admin_username && password_ok
    }
}
