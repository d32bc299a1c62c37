//! Server configuration, loaded from environment variables at startup.

/// Fallback redirect for blocked pages when neither the category nor the
/// `blocked_redirect` setting provides one.
pub const DEFAULT_BLOCK_REDIRECT: &str = "https://blocked.gdistrict.org/Gschool%20block";

/// Request bodies accepted by `/classify` and buffered by the trace
/// middleware (16 MiB).  Captured pages routinely exceed axum's 2 MiB default.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Runtime configuration for gschool-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// SQLite database URL (default: `"sqlite://gschool.db"`).
    pub database_url: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// When set, logs are also written to a daily-rolling file in this directory.
    pub log_dir: Option<String>,

    /// Comma-separated list of allowed CORS origins; wildcard when unset.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI at `/swagger-ui`.
    pub enable_swagger: bool,

    /// Bearer token required by the settings routes. Unset means open.
    pub admin_token: Option<String>,

    /// Last-resort redirect URL for blocked pages.
    pub default_block_redirect: String,

    /// Remote classification service; the built-in keyword classifier is
    /// used when unset.
    pub classifier_url: Option<String>,

    /// Request timeout for the remote classifier, in seconds.
    pub classifier_timeout_secs: u64,

    /// Largest request body accepted, in bytes.
    pub max_body_bytes: usize,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("GSCHOOL_BIND", "0.0.0.0:3000"),
            database_url: env_or("GSCHOOL_DATABASE_URL", "sqlite://gschool.db"),
            log_level: env_or("GSCHOOL_LOG", "info"),
            log_json: env_flag("GSCHOOL_LOG_JSON", false),
            log_dir: env_opt("GSCHOOL_LOG_DIR"),
            cors_allowed_origins: env_opt("GSCHOOL_CORS_ORIGINS"),
            enable_swagger: env_flag("GSCHOOL_ENABLE_SWAGGER", true),
            admin_token: env_opt("GSCHOOL_ADMIN_TOKEN"),
            default_block_redirect: env_or("GSCHOOL_DEFAULT_REDIRECT", DEFAULT_BLOCK_REDIRECT),
            classifier_url: env_opt("GSCHOOL_CLASSIFIER_URL"),
            classifier_timeout_secs: parse_env("GSCHOOL_CLASSIFIER_TIMEOUT_SECS", 10),
            max_body_bytes: parse_env("GSCHOOL_MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_owned(),
            database_url: "sqlite://gschool.db".to_owned(),
            log_level: "info".to_owned(),
            log_json: false,
            log_dir: None,
            cors_allowed_origins: None,
            enable_swagger: true,
            admin_token: None,
            default_block_redirect: DEFAULT_BLOCK_REDIRECT.to_owned(),
            classifier_url: None,
            classifier_timeout_secs: 10,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Unset and blank values are both treated as absent.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
