/// Configuration management for the API server
///
/// This module loads configuration from environment variables (and a `.env`
/// file when present) into a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8000)
/// - `DB_PATH`: SQLite database file, created if missing (default: projects.db)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any
///   (default: http://127.0.0.1:5173,http://localhost:5173)
/// - `SESSION_COOKIE_SECURE`: Add `Secure` to the session cookie (default: false)
/// - `DEFAULT_ADMIN_USER` / `DEFAULT_ADMIN_PASSWORD`: Bootstrap admin created
///   when no users exist (default: unset)
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use projectboard_api::config::Config;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}:{}", config.api.host, config.api.port);
/// # Ok(())
/// # }
/// ```

use projectboard_shared::db::pool::DatabaseConfig as PoolConfig;
use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_CORS_ORIGINS: &str = "http://127.0.0.1:5173,http://localhost:5173";

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session cookie configuration
    pub session: SessionConfig,

    /// Bootstrap admin account
    pub bootstrap: BootstrapConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path
    pub path: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

/// Session cookie configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Mark the cookie `Secure` (HTTPS deployments)
    pub cookie_secure: bool,
}

/// Bootstrap admin credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootstrapConfig {
    pub admin_user: Option<String>,

    #[serde(skip_serializing)]
    pub admin_password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            },
            database: DatabaseConfig {
                path: "projects.db".to_string(),
                max_connections: 5,
            },
            session: SessionConfig {
                cookie_secure: false,
            },
            bootstrap: BootstrapConfig::default(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("Invalid boolean value: {}", other),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable has an invalid value.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let api_host = env::var("API_HOST").unwrap_or(defaults.api.host);
        let api_port = match env::var("API_PORT") {
            Ok(port) => port.parse::<u16>()?,
            Err(_) => defaults.api.port,
        };
        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or(defaults.api.cors_origins);

        let db_path = env::var("DB_PATH").unwrap_or(defaults.database.path);
        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(value) => value.parse::<u32>()?,
            Err(_) => defaults.database.max_connections,
        };

        let cookie_secure = match env::var("SESSION_COOKIE_SECURE") {
            Ok(value) => parse_flag(&value)?,
            Err(_) => defaults.session.cookie_secure,
        };

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            database: DatabaseConfig {
                path: db_path,
                max_connections,
            },
            session: SessionConfig { cookie_secure },
            bootstrap: BootstrapConfig {
                admin_user: non_empty_var("DEFAULT_ADMIN_USER"),
                admin_password: non_empty_var("DEFAULT_ADMIN_PASSWORD"),
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether any origin may call the API
    pub fn cors_permissive(&self) -> bool {
        self.api.cors_origins.iter().any(|origin| origin == "*")
    }

    /// Pool settings for the shared database layer
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            path: self.database.path.clone(),
            max_connections: self.database.max_connections,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let mut config = Config::default();
        config.api.host = "127.0.0.1".to_string();

        assert_eq!(config.bind_address(), "127.0.0.1:8000");
    }

    #[test]
    fn test_default_origins() {
        let config = Config::default();
        assert_eq!(
            config.api.cors_origins,
            vec!["http://127.0.0.1:5173".to_string(), "http://localhost:5173".to_string()]
        );
        assert!(!config.cors_permissive());
    }

    #[test]
    fn test_parse_origins_trims_and_skips_blanks() {
        assert_eq!(
            parse_origins(" https://a.example , ,https://b.example"),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert_eq!(parse_origins("*"), vec!["*".to_string()]);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag("1").unwrap());
        assert!(!parse_flag("FALSE").unwrap());
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn test_pool_config_carries_path_and_size() {
        let mut config = Config::default();
        config.database.path = "/tmp/board.db".to_string();
        config.database.max_connections = 2;

        let pool = config.pool_config();
        assert_eq!(pool.path, "/tmp/board.db");
        assert_eq!(pool.max_connections, 2);
    }

    #[test]
    fn test_bootstrap_password_not_serialized() {
        let mut config = Config::default();
        config.bootstrap.admin_password = Some("Secret-Password-1".to_string());

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("Secret-Password-1"));
    }
}
