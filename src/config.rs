//! Layered configuration for hrdesk.
//!
//! Values resolve file → environment → CLI:
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5000/api"
//! timeout_secs = 30
//!
//! [search]
//! debounce_ms = 350
//!
//! [session]
//! cache_file = "/home/me/.cache/hrdesk/session.json"
//! ```
//!
//! `HRDESK_API_URL` (also read from `.env`) overrides `api.base_url`, and the
//! `--api-url` flag overrides both.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DEBOUNCE_MS: u64 = 350;
pub const API_URL_ENV: &str = "HRDESK_API_URL";
pub const CONFIG_FILE_NAME: &str = "hrdesk.toml";

/// What the HTTP adapter needs to talk to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchSection {
    /// Quiet period before a typed search term triggers a fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_file: Option<PathBuf>,
}

/// Contents of `hrdesk.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HrdeskToml {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub session: SessionSection,
}

impl HrdeskToml {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse hrdesk.toml")
    }

    /// Missing file means defaults; an unreadable one is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize hrdesk.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// The file `hrdesk config init` writes: every default spelled out.
    pub fn template() -> Self {
        Self {
            api: ApiSection {
                base_url: Some(DEFAULT_BASE_URL.to_string()),
                timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            },
            search: SearchSection {
                debounce_ms: Some(DEFAULT_DEBOUNCE_MS),
            },
            session: SessionSection::default(),
        }
    }
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    pub search_debounce: Duration,
    pub session_file: PathBuf,
    /// The config file that was consulted, whether or not it existed.
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load `.env`, the config file, and apply the environment and CLI overrides.
    pub fn load(config_path: Option<&Path>, cli_api_url: Option<&str>) -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }

        let source = config_path.map(Path::to_path_buf).or_else(default_config_path);
        let file = match &source {
            Some(path) => HrdeskToml::load_or_default(path)?,
            None => HrdeskToml::default(),
        };
        let env_url = std::env::var(API_URL_ENV).ok().filter(|v| !v.trim().is_empty());

        let mut config = Self::resolve(&file, env_url.as_deref(), cli_api_url)?;
        config.source = source;
        Ok(config)
    }

    /// Pure layering step, separated from I/O.
    pub fn resolve(file: &HrdeskToml, env_api_url: Option<&str>, cli_api_url: Option<&str>) -> Result<Self> {
        let raw_url = cli_api_url
            .or(env_api_url)
            .or(file.api.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL);
        let base_url = normalize_base_url(raw_url)?;

        let timeout_secs = file.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            bail!("api.timeout_secs must be greater than zero");
        }

        let session_file = file
            .session
            .cache_file
            .clone()
            .unwrap_or_else(default_session_file);

        Ok(Self {
            api: ApiConfig {
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
            search_debounce: Duration::from_millis(file.search.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)),
            session_file,
            source: None,
        })
    }
}

/// Trim whitespace and trailing slashes; only http(s) URLs are accepted.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        bail!("Invalid API base URL '{}': expected http:// or https://", raw.trim());
    }
    reqwest::Url::parse(trimmed).with_context(|| format!("Invalid API base URL '{}'", raw.trim()))?;
    Ok(trimmed.to_string())
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hrdesk").join(CONFIG_FILE_NAME))
}

pub fn default_session_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("hrdesk")
        .join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::resolve(&HrdeskToml::default(), None, None).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout, Duration::from_secs(30));
        assert_eq!(config.search_debounce, Duration::from_millis(350));
        assert!(config.session_file.ends_with("hrdesk/session.json"));
    }

    #[test]
    fn test_file_then_env_then_cli() {
        let file = HrdeskToml::parse(
            r#"
            [api]
            base_url = "http://file.example/api"
            timeout_secs = 5

            [search]
            debounce_ms = 100
            "#,
        )
        .unwrap();

        let from_file = Config::resolve(&file, None, None).unwrap();
        assert_eq!(from_file.api.base_url, "http://file.example/api");
        assert_eq!(from_file.api.timeout, Duration::from_secs(5));
        assert_eq!(from_file.search_debounce, Duration::from_millis(100));

        let from_env = Config::resolve(&file, Some("https://env.example/api/"), None).unwrap();
        assert_eq!(from_env.api.base_url, "https://env.example/api");

        let from_cli = Config::resolve(&file, Some("https://env.example/api"), Some("http://127.0.0.1:9000")).unwrap();
        assert_eq!(from_cli.api.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = Config::resolve(&HrdeskToml::default(), None, Some("ftp://x")).unwrap_err();
        assert!(err.to_string().contains("expected http:// or https://"));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let file = HrdeskToml::parse("[api]\ntimeout_secs = 0\n").unwrap();
        assert!(Config::resolve(&file, None, None).is_err());
    }

    #[test]
    fn test_normalize_base_url_trims() {
        assert_eq!(
            normalize_base_url("  http://localhost:5000/api///  ").unwrap(),
            "http://localhost:5000/api"
        );
        assert!(normalize_base_url("http://").is_err());
    }

    #[test]
    fn test_unknown_sections_are_ignored_and_empty_file_is_default() {
        assert_eq!(HrdeskToml::parse("").unwrap(), HrdeskToml::default());
        let parsed = HrdeskToml::parse("[ui]\ntheme = \"dark\"\n").unwrap();
        assert_eq!(parsed, HrdeskToml::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let err = HrdeskToml::parse("[api\nbase_url=").unwrap_err();
        assert!(err.to_string().contains("Failed to parse hrdesk.toml"));
    }

    #[test]
    fn test_save_and_load_template() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        HrdeskToml::template().save(&path).unwrap();

        let loaded = HrdeskToml::load(&path).unwrap();
        assert_eq!(loaded, HrdeskToml::template());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let loaded = HrdeskToml::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, HrdeskToml::default());
    }

    #[test]
    fn test_session_file_override() {
        let file = HrdeskToml::parse("[session]\ncache_file = \"/tmp/hrdesk-test/s.json\"\n").unwrap();
        let config = Config::resolve(&file, None, None).unwrap();
        assert_eq!(config.session_file, PathBuf::from("/tmp/hrdesk-test/s.json"));
    }
}
