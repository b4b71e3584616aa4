//! Server configuration, loaded from environment variables at startup.

/// Runtime configuration for contact-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// SQLite database URL (default: `"sqlite://contact.db"`). The file is
    /// created on first start.
    pub database_url: String,

    /// Upper bound on pooled database connections.
    pub db_max_connections: u32,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// When set, logs are also written to a daily-rolling file in this directory.
    pub log_dir: Option<String>,

    /// Comma-separated CORS allow-list. `None` allows any origin.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI at `/swagger-ui`.
    pub enable_swagger: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_owned(),
            database_url: "sqlite://contact.db".to_owned(),
            db_max_connections: 5,
            log_level: "info".to_owned(),
            log_json: false,
            log_dir: None,
            cors_allowed_origins: None,
            enable_swagger: true,
        }
    }
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: env_or("CONTACT_BIND", &defaults.bind_address),
            database_url: env_or("CONTACT_DATABASE_URL", &defaults.database_url),
            db_max_connections: parse_env("CONTACT_DB_MAX_CONNECTIONS", defaults.db_max_connections),
            log_level: env_or("CONTACT_LOG", &defaults.log_level),
            log_json: env_flag("CONTACT_LOG_JSON", defaults.log_json),
            log_dir: env_opt("CONTACT_LOG_DIR"),
            cors_allowed_origins: env_opt("CONTACT_CORS_ORIGINS"),
            enable_swagger: env_flag("CONTACT_ENABLE_SWAGGER", defaults.enable_swagger),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(default)
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
