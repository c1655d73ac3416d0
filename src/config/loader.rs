use std::io::ErrorKind;
use std::path::Path;

use anyhow::{anyhow, Result};
use regex::{Captures, Regex};

use crate::config::settings::{LoggingConfig, Settings};

/// Outcome of loading settings; whether the file existed is kept so the
/// caller can report it once logging is initialised.
#[derive(Debug)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub from_file: bool,
}

/// Load settings from a YAML file. A missing file yields defaults.
pub async fn file_to_settings(path: &Path) -> Result<LoadedSettings> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            let settings = parse_settings(&expand_env_vars(&content)?)
                .map_err(|e| anyhow!("Invalid config format in '{}': {}", path.display(), e))?;
            Ok(LoadedSettings { settings, from_file: true })
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(LoadedSettings {
            settings: with_defaults(Settings::default()),
            from_file: false,
        }),
        Err(e) => Err(anyhow!("Failed to read config '{}': {}", path.display(), e)),
    }
}

pub fn parse_settings(content: &str) -> Result<Settings> {
    // an empty document deserializes as unit, not as an empty map
    if content.trim().is_empty() {
        return Ok(with_defaults(Settings::default()));
    }
    let settings: Settings = serde_yaml::from_str(content)?;
    Ok(with_defaults(settings))
}

fn with_defaults(mut settings: Settings) -> Settings {
    if settings.logging.is_none() {
        settings.logging = Some(LoggingConfig::default());
    }
    settings
}

/// Replace `${VAR}` and `${VAR:default}` with environment values.
pub fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}")?;
    Ok(re
        .replace_all(input, |caps: &Captures| {
            let var = &caps[1];
            let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            std::env::var(var).unwrap_or_else(|_| default.to_string())
        })
        .to_string())
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;
    use crate::config::settings::LogFormat;

    #[test]
    fn test_parse_full_settings() {
        let settings = parse_settings(
            r#"
store:
  path: /tmp/tokens.yaml
  prefix: myapp
logging:
  level: debug
  format: json
"#,
        )
        .unwrap();
        assert_eq!(settings.store.path, "/tmp/tokens.yaml");
        assert_eq!(settings.store.prefix, "myapp");
        let logging = settings.logging.unwrap();
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, LogFormat::Json);
    }

    #[test]
    fn test_parse_applies_defaults() {
        let settings = parse_settings("store:\n  prefix: other\n").unwrap();
        assert_eq!(settings.store.path, "oauth-token-store.yaml");
        assert_eq!(settings.store.prefix, "other");
        let logging = settings.logging.unwrap();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Compact);

        let empty = parse_settings("").unwrap();
        assert_eq!(empty.store.prefix, "app");
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        assert!(parse_settings("logging:\n  format: xml\n").is_err());
    }

    #[test]
    #[serial]
    fn test_expand_env_vars() {
        std::env::set_var("OAUTH_TOKEN_TEST_DIR", "/var/lib/tokens");
        std::env::remove_var("OAUTH_TOKEN_TEST_MISSING");

        let out = expand_env_vars(
            "path: ${OAUTH_TOKEN_TEST_DIR}/store.yaml\nprefix: ${OAUTH_TOKEN_TEST_MISSING:fallback}\n",
        )
        .unwrap();
        assert_eq!(out, "path: /var/lib/tokens/store.yaml\nprefix: fallback\n");

        std::env::remove_var("OAUTH_TOKEN_TEST_DIR");
    }

    #[tokio::test]
    #[serial]
    async fn test_file_to_settings_expands_env() {
        std::env::set_var("OAUTH_TOKEN_TEST_PREFIX", "fromenv");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oauth-token.yaml");
        std::fs::write(&path, "store:\n  prefix: ${OAUTH_TOKEN_TEST_PREFIX}\n").unwrap();

        let loaded = file_to_settings(&path).await.unwrap();
        assert!(loaded.from_file);
        assert_eq!(loaded.settings.store.prefix, "fromenv");

        std::env::remove_var("OAUTH_TOKEN_TEST_PREFIX");
    }

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = file_to_settings(&dir.path().join("absent.yaml")).await.unwrap();
        assert!(!loaded.from_file);
        assert_eq!(loaded.settings.store.prefix, "app");
        assert!(loaded.settings.logging.is_some());
    }

    #[tokio::test]
    async fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "store: [1, 2").unwrap();
        let err = file_to_settings(&path).await.unwrap_err();
        assert!(err.to_string().contains("Invalid config format"));
    }
}
