//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    pub attachment_store_url: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Panics if required variables are missing or improperly formatted.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "helpdesk-api".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/helpdesk.db".into()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .expect("PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET is required"),
            jwt_duration_minutes: env::var("JWT_DURATION_MINUTES")
                .unwrap_or_else(|_| "60".into())
                .parse()
                .expect("JWT_DURATION_MINUTES must be a number"),
            attachment_store_url: env::var("ATTACHMENT_STORE_URL").unwrap_or_default(),
        }
    }

    fn instance() -> &'static RwLock<AppConfig> {
        CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()))
    }

    /// Returns a snapshot of the current configuration.
    pub fn get() -> AppConfig {
        Self::instance().read().expect("config lock poisoned").clone()
    }

    /// Replaces the current configuration. Intended for tests and runtime overrides.
    pub fn override_config(new: AppConfig) {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(new.clone()));
        *lock.write().expect("config lock poisoned") = new;
    }
}

pub fn env() -> String {
    AppConfig::get().env
}

pub fn project_name() -> String {
    AppConfig::get().project_name
}

pub fn log_level() -> String {
    AppConfig::get().log_level
}

pub fn log_file() -> String {
    AppConfig::get().log_file
}

pub fn log_to_stdout() -> bool {
    AppConfig::get().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::get().database_path
}

pub fn host() -> String {
    AppConfig::get().host
}

pub fn port() -> u16 {
    AppConfig::get().port
}

pub fn jwt_secret() -> String {
    AppConfig::get().jwt_secret
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::get().jwt_duration_minutes
}

pub fn attachment_store_url() -> String {
    AppConfig::get().attachment_store_url
}
