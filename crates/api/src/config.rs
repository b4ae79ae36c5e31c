use std::path::PathBuf;

use outreach_core::gate::GateMode;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the admin credentials have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on post-shutdown cleanup in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Session token signing and lifetime.
    pub jwt: JwtConfig,
    /// Argon2id PHC hash of the shared admin password.
    pub admin_password_hash: String,
    /// Where missing admin sessions are caught (default: edge).
    pub gate_mode: GateMode,
    /// Directory holding the public site and the admin page shell.
    pub assets_dir: PathBuf,
    /// Mark the session cookie `Secure`. True when `RUST_ENV=production`.
    pub secure_cookies: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                       |
    /// | `ADMIN_PASSWORD_HASH`   | required                   |
    /// | `AUTH_GATE_MODE`        | `edge`                     |
    /// | `ADMIN_ASSETS_DIR`      | `assets`                   |
    /// | `RUST_ENV`              | `development`              |
    ///
    /// # Panics
    ///
    /// Panics on any invalid value so misconfiguration fails fast at start-up.
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

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        let admin_password_hash = std::env::var("ADMIN_PASSWORD_HASH")
            .expect("ADMIN_PASSWORD_HASH must be set (generate one with `hash-password`)");
        argon2::PasswordHash::new(&admin_password_hash)
            .expect("ADMIN_PASSWORD_HASH must be a PHC-formatted Argon2 hash");

        let gate_mode: GateMode = std::env::var("AUTH_GATE_MODE")
            .unwrap_or_else(|_| "edge".into())
            .parse()
            .expect("AUTH_GATE_MODE must be `edge` or `client`");

        let assets_dir = PathBuf::from(
            std::env::var("ADMIN_ASSETS_DIR").unwrap_or_else(|_| "assets".into()),
        );

        let secure_cookies = std::env::var("RUST_ENV")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            admin_password_hash,
            gate_mode,
            assets_dir,
            secure_cookies,
        }
    }
}
