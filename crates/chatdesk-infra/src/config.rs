//! Configuration loader for Chatdesk.
//!
//! Reads `config.toml` from the data directory (`~/.chatdesk/` in production)
//! and deserializes it into [`AppConfig`]. Falls back to defaults when the
//! file is missing or malformed, and lets the environment override the
//! signing key for containerized deployments.

use std::path::{Path, PathBuf};

use chatdesk_types::config::AppConfig;
use secrecy::SecretString;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CHATDESK_DATA_DIR";

/// Environment variable overriding the token signing key.
pub const SECRET_KEY_ENV: &str = "CHATDESK_SECRET_KEY";

/// Resolve the data directory.
///
/// Priority: `$CHATDESK_DATA_DIR`, then `~/.chatdesk`, then `./.chatdesk`
/// as a last resort when no home directory exists.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatdesk");
    }

    PathBuf::from(".chatdesk")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Apply environment overrides to a loaded config.
///
/// `$CHATDESK_SECRET_KEY`, when set and non-empty, replaces the signing key
/// from the file.
pub fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(key) = std::env::var(SECRET_KEY_ENV) {
        if !key.is_empty() {
            config.auth.secret_key = SecretString::from(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.auth.access_token_ttl_minutes, 30);
        assert!(config.auth.uses_dev_key());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[auth]
secret_key = "deployment-key"
access_token_ttl_minutes = 120
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.auth.access_token_ttl_minutes, 120);
        assert_eq!(config.auth.secret_key.expose_secret(), "deployment-key");
    }

    #[tokio::test]
    async fn load_config_partial_toml_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            "[auth]\nsecret_key = \"only-the-key\"\n",
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.auth.access_token_ttl_minutes, 30);
        assert!(!config.auth.uses_dev_key());
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert!(config.auth.uses_dev_key());
        assert_eq!(config.auth.access_token_ttl_minutes, 30);
    }
}
