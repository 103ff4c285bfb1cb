//! Configuration
//!
//! JSON設定ファイルの読み込み

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

pub const PHOTOS_APPEND_SCOPE: &str = "https://www.googleapis.com/auth/photoslibrary.appendonly";

fn default_scopes() -> Vec<String> {
    vec![PHOTOS_APPEND_SCOPE.to_string()]
}

fn default_token_cache_path() -> String {
    "~/.config/photosync/token.json".to_string()
}

fn default_auth_url() -> String {
    "https://accounts.google.com/o/oauth2/v2/auth".to_string()
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_api_base_url() -> String {
    "https://photoslibrary.googleapis.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_consent_timeout_secs() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    // OAuth client (Desktop app)
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
    /// 0 picks an ephemeral loopback port
    #[serde(default)]
    pub redirect_port: u16,
    #[serde(default = "default_token_cache_path")]
    pub token_cache_path: String,

    // Endpoints
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    // Behaviour
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_consent_timeout_secs")]
    pub consent_timeout_secs: u64,
    #[serde(default = "default_true")]
    pub fix_timestamps: bool,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let content = fs::read_to_string(expanded.as_ref())
            .with_context(|| format!("Failed to read config file: {}", expanded))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(content).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            bail!("client_id must not be empty");
        }
        if self.scopes.is_empty() {
            bail!("At least one OAuth scope is required");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_json(r#"{"client_id": "abc.apps.googleusercontent.com"}"#)
            .unwrap();

        assert_eq!(config.client_id, "abc.apps.googleusercontent.com");
        assert_eq!(config.client_secret, "");
        assert_eq!(config.scopes, vec![PHOTOS_APPEND_SCOPE.to_string()]);
        assert_eq!(config.redirect_port, 0);
        assert_eq!(config.api_base_url, "https://photoslibrary.googleapis.com");
        assert_eq!(config.request_timeout_secs, 120);
        assert!(config.fix_timestamps);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_json(
            r#"{
                "client_id": "id",
                "client_secret": "secret",
                "scopes": ["scope-a", "scope-b"],
                "redirect_port": 8085,
                "token_cache_path": "/tmp/token.json",
                "auth_url": "http://localhost/auth",
                "token_url": "http://localhost/token",
                "api_base_url": "http://localhost/api",
                "request_timeout_secs": 10,
                "consent_timeout_secs": 30,
                "fix_timestamps": false
            }"#,
        )
        .unwrap();

        assert_eq!(config.client_secret, "secret");
        assert_eq!(config.scopes.len(), 2);
        assert_eq!(config.redirect_port, 8085);
        assert_eq!(config.token_url, "http://localhost/token");
        assert_eq!(config.consent_timeout_secs, 30);
        assert!(!config.fix_timestamps);
    }

    #[test]
    fn test_missing_client_id() {
        assert!(Config::from_json(r#"{}"#).is_err());
        assert!(Config::from_json(r#"{"client_id": "  "}"#).is_err());
    }

    #[test]
    fn test_empty_scopes_rejected() {
        assert!(Config::from_json(r#"{"client_id": "id", "scopes": []}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"client_id": "from-file"}"#).unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.client_id, "from-file");
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Config::load("/nonexistent/photosync/config.json").is_err());
    }
}
