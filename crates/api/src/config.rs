use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// Optional integrations stay `None` when unconfigured; the one hard
/// requirement is the download signing secret, which has no default and no
/// fallback. A process without it must not start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// HMAC secret for signed download links. Required, never defaulted.
    pub download_secret: String,
    /// Validity window for freshly issued download links, in hours.
    pub download_validity_hours: i64,
    /// Paystack secret key. `None` disables payment verification and
    /// webhook authentication (both endpoints answer 500).
    pub paystack_secret_key: Option<String>,
    /// Whether `APP_ENV=development`. Gates the simulated-payment bypass;
    /// unreachable in any other mode.
    pub dev_mode: bool,
    /// Operator key protecting the analytics aggregate. `None` leaves the
    /// aggregate open.
    pub analytics_secret: Option<String>,
    /// Object-storage bucket for book files. `None` disables the S3 source.
    pub storage_bucket: Option<String>,
    /// Local directory holding book files, outside any public tree.
    pub files_dir: PathBuf,
    /// Whether webhook-confirmed purchases also email the buyer. Off by
    /// default so the webhook backstop never duplicates the synchronous
    /// path's confirmation.
    pub webhook_notifications: bool,
    /// Internal stakeholder addresses for purchase notifications.
    pub admin_emails: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default     |
    /// |----------------------------|-------------|
    /// | `HOST`                     | `0.0.0.0`   |
    /// | `PORT`                     | `3000`      |
    /// | `CORS_ORIGINS`             | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`        |
    /// | `DOWNLOAD_SECRET`          | — required  |
    /// | `DOWNLOAD_VALIDITY_HOURS`  | `24`        |
    /// | `PAYSTACK_SECRET_KEY`      | — optional  |
    /// | `APP_ENV`                  | `production`|
    /// | `ANALYTICS_SECRET`         | — optional  |
    /// | `STORAGE_BUCKET`           | — optional  |
    /// | `FILES_DIR`                | `files`     |
    /// | `WEBHOOK_NOTIFICATIONS`    | `false`     |
    /// | `ADMIN_EMAILS`             | — optional  |
    ///
    /// # Panics
    ///
    /// Panics if `DOWNLOAD_SECRET` is unset or empty. Refusing to start is
    /// the whole point: a missing secret must never degrade into signing
    /// with some built-in value.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let download_secret = std::env::var("DOWNLOAD_SECRET")
            .expect("DOWNLOAD_SECRET must be set in the environment");
        assert!(!download_secret.trim().is_empty(), "DOWNLOAD_SECRET must not be empty");

        let download_validity_hours: i64 = std::env::var("DOWNLOAD_VALIDITY_HOURS")
            .unwrap_or_else(|_| folio_core::capability::DEFAULT_VALIDITY_HOURS.to_string())
            .parse()
            .expect("DOWNLOAD_VALIDITY_HOURS must be a valid i64");

        let paystack_secret_key = non_empty_var("PAYSTACK_SECRET_KEY");
        let dev_mode = std::env::var("APP_ENV")
            .map(|v| v == "development")
            .unwrap_or(false);

        let analytics_secret = non_empty_var("ANALYTICS_SECRET");
        let storage_bucket = non_empty_var("STORAGE_BUCKET");

        let files_dir = PathBuf::from(std::env::var("FILES_DIR").unwrap_or_else(|_| "files".into()));

        let webhook_notifications = std::env::var("WEBHOOK_NOTIFICATIONS")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let admin_emails = folio_notify::admin_recipients_from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            download_secret,
            download_validity_hours,
            paystack_secret_key,
            dev_mode,
            analytics_secret,
            storage_bucket,
            files_dir,
            webhook_notifications,
            admin_emails,
        }
    }
}

/// Read an env var, treating unset and blank the same way.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
