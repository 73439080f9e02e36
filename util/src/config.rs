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
    pub qr_token_secret: String,
    pub qr_rotation_seconds: u64,
    pub qr_token_ttl_seconds: i64,
    pub qr_broadcast_max_seconds: i64,
    pub present_threshold_minutes: i64,
    pub late_threshold_minutes: i64,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// This method is used internally to populate the singleton. It panics
    /// if required variables are missing or improperly formatted.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "rollcall".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH").expect("DATABASE_PATH is required"),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .unwrap(),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET is required"),
            jwt_duration_minutes: env::var("JWT_DURATION_MINUTES")
                .unwrap_or("60".into())
                .parse()
                .unwrap(),
            qr_token_secret: env::var("QR_TOKEN_SECRET").expect("QR_TOKEN_SECRET is required"),
            qr_rotation_seconds: env::var("QR_ROTATION_SECONDS")
                .unwrap_or("5".into())
                .parse()
                .unwrap(),
            qr_token_ttl_seconds: env::var("QR_TOKEN_TTL_SECONDS")
                .unwrap_or("15".into())
                .parse()
                .unwrap(),
            qr_broadcast_max_seconds: env::var("QR_BROADCAST_MAX_SECONDS")
                .unwrap_or("3600".into())
                .parse()
                .unwrap(),
            present_threshold_minutes: env::var("PRESENT_THRESHOLD_MINUTES")
                .unwrap_or("10".into())
                .parse()
                .unwrap(),
            late_threshold_minutes: env::var("LATE_THRESHOLD_MINUTES")
                .unwrap_or("20".into())
                .parse()
                .unwrap(),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().unwrap();
            *guard = AppConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    ///
    /// Used by public per-field setter methods.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    /// Override `env` value.
    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_project_name(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.project_name = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_file(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_file = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_host(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.host = value.into());
    }

    pub fn set_port(value: u16) {
        AppConfig::set_field(|cfg| cfg.port = value);
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value.into());
    }

    pub fn set_qr_token_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.qr_token_secret = value.into());
    }

    pub fn set_qr_rotation_seconds(value: u64) {
        AppConfig::set_field(|cfg| cfg.qr_rotation_seconds = value);
    }

    pub fn set_qr_token_ttl_seconds(value: i64) {
        AppConfig::set_field(|cfg| cfg.qr_token_ttl_seconds = value);
    }

    pub fn set_qr_broadcast_max_seconds(value: i64) {
        AppConfig::set_field(|cfg| cfg.qr_broadcast_max_seconds = value);
    }

    pub fn set_present_threshold_minutes(value: i64) {
        AppConfig::set_field(|cfg| cfg.present_threshold_minutes = value);
    }

    pub fn set_late_threshold_minutes(value: i64) {
        AppConfig::set_field(|cfg| cfg.late_threshold_minutes = value);
    }
}

// --- Convenience accessors for the global config ---

pub fn app_env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

pub fn qr_token_secret() -> String {
    AppConfig::global().qr_token_secret.clone()
}

pub fn qr_rotation_seconds() -> u64 {
    AppConfig::global().qr_rotation_seconds
}

pub fn qr_token_ttl_seconds() -> i64 {
    AppConfig::global().qr_token_ttl_seconds
}

pub fn qr_broadcast_max_seconds() -> i64 {
    AppConfig::global().qr_broadcast_max_seconds
}

pub fn present_threshold_minutes() -> i64 {
    AppConfig::global().present_threshold_minutes
}

pub fn late_threshold_minutes() -> i64 {
    AppConfig::global().late_threshold_minutes
}

/// Builds the rotation and validity settings for QR broadcasts from the
/// global configuration.
pub fn qr_settings() -> attendance::QrSettings {
    let cfg = AppConfig::global();
    attendance::QrSettings {
        rotation_seconds: cfg.qr_rotation_seconds,
        token_ttl_seconds: cfg.qr_token_ttl_seconds,
        broadcast_max_seconds: cfg.qr_broadcast_max_seconds,
        present_threshold_minutes: cfg.present_threshold_minutes,
        late_threshold_minutes: cfg.late_threshold_minutes,
    }
}
