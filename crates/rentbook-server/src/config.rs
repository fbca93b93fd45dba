//! Environment-driven server configuration.

use rentbook_auth::AuthConfig;
use rentbook_db::DbConfig;

/// Full server configuration assembled from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    pub db: DbConfig,
    pub auth: AuthConfig,
    /// Minutes added to UTC when deriving "today" for dashboards.
    pub utc_offset_minutes: i32,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// `RENTBOOK_JWT_SECRET` is mandatory — the server refuses to start
    /// without a signing secret. Everything else has a default.
    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = std::env::var("RENTBOOK_JWT_SECRET")
            .map_err(|_| "RENTBOOK_JWT_SECRET must be set".to_string())?;

        let db = DbConfig {
            url: env_or("RENTBOOK_DB_URL", "127.0.0.1:8000"),
            namespace: env_or("RENTBOOK_DB_NAMESPACE", "rentbook"),
            database: env_or("RENTBOOK_DB_DATABASE", "main"),
            username: env_or("RENTBOOK_DB_USERNAME", "root"),
            password: env_or("RENTBOOK_DB_PASSWORD", "root"),
        };

        let auth = AuthConfig {
            jwt_secret,
            pepper: std::env::var("RENTBOOK_PASSWORD_PEPPER").ok(),
            ..AuthConfig::default()
        };

        let utc_offset_minutes = env_or("RENTBOOK_UTC_OFFSET_MINUTES", "0")
            .parse::<i32>()
            .map_err(|e| format!("RENTBOOK_UTC_OFFSET_MINUTES must be an integer: {e}"))?;

        Ok(Self {
            bind_addr: env_or("RENTBOOK_BIND_ADDR", "0.0.0.0:3001"),
            db,
            auth,
            utc_offset_minutes,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
