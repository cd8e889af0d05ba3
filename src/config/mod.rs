//! Configuration module for the Symplibackup proxy.
//!
//! All configuration is loaded from environment variables with sensible defaults,
//! once at startup. Nothing here is mutated at runtime.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the UrBackup web API
    pub backend_url: String,
    /// UrBackup account used to open backend sessions
    pub backend_user: String,
    /// Password for the backend account
    pub backend_pass: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Operator account gating GET /docs (gate disabled when unset)
    pub docs_user: Option<String>,
    /// Password for the documentation gate
    pub docs_pass: Option<String>,
    /// Path to the server-wide UrBackup log file
    pub server_log: PathBuf,
    /// Directory holding per-client log files (urbackup_<client>.log)
    pub client_log_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let backend_url = env::var("SYMPLI_BACKEND_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:55414/x".to_string());

        let backend_user = env::var("SYMPLI_BACKEND_USER").unwrap_or_else(|_| "admin".to_string());

        let backend_pass = env::var("SYMPLI_BACKEND_PASS").unwrap_or_default();

        let bind_addr = env::var("SYMPLI_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid SYMPLI_BIND_ADDR format");

        let log_level = env::var("SYMPLI_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let docs_user = env::var("SYMPLI_DOCS_USER").ok();
        let docs_pass = env::var("SYMPLI_DOCS_PASS").ok();

        let server_log = env::var("SYMPLI_SERVER_LOG")
            .unwrap_or_else(|_| "/var/log/urbackup.log".to_string())
            .into();

        let client_log_dir = env::var("SYMPLI_CLIENT_LOG_DIR")
            .unwrap_or_else(|_| "/var/log".to_string())
            .into();

        Self {
            backend_url,
            backend_user,
            backend_pass,
            bind_addr,
            log_level,
            docs_user,
            docs_pass,
            server_log,
            client_log_dir,
        }
    }

    /// Path of the log file for one client, named after its loose identifier.
    pub fn client_log_path(&self, identifier: &str) -> PathBuf {
        self.client_log_dir
            .join(format!("urbackup_{identifier}.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("SYMPLI_BACKEND_URL");
        env::remove_var("SYMPLI_BACKEND_USER");
        env::remove_var("SYMPLI_BACKEND_PASS");
        env::remove_var("SYMPLI_BIND_ADDR");
        env::remove_var("SYMPLI_LOG_LEVEL");
        env::remove_var("SYMPLI_DOCS_USER");
        env::remove_var("SYMPLI_DOCS_PASS");
        env::remove_var("SYMPLI_SERVER_LOG");
        env::remove_var("SYMPLI_CLIENT_LOG_DIR");

        let config = Config::from_env();

        assert_eq!(config.backend_url, "http://127.0.0.1:55414/x");
        assert_eq!(config.backend_user, "admin");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert!(config.docs_user.is_none());
        assert_eq!(config.server_log, PathBuf::from("/var/log/urbackup.log"));
    }

    #[test]
    fn test_client_log_path() {
        let mut config = Config::from_env();
        config.client_log_dir = PathBuf::from("/var/log");
        assert_eq!(
            config.client_log_path("pc-bureau"),
            PathBuf::from("/var/log/urbackup_pc-bureau.log")
        );
    }
}
