use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use webwords_core::normalize::{Normalizer, DEFAULT_PUNCTUATION};
use webwords_core::SyncError;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub fieldbook: FieldbookConfig,
    #[serde(default)]
    pub normalize: NormalizeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FieldbookConfig {
    pub book: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_sheet")]
    pub sheet: String,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.fieldbook.com/v1".to_string()
}
fn default_sheet() -> String {
    "words".to_string()
}
fn default_max_retries() -> u32 {
    3
}
fn default_timeout_secs() -> u64 {
    30
}

/// Environment fallbacks for credentials left out of the config file.
pub const KEY_ENV: &str = "FIELDBOOK_KEY";
pub const SECRET_ENV: &str = "FIELDBOOK_SECRET";

/// Resolved API credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl FieldbookConfig {
    /// API key and secret from the config file, falling back to
    /// `$FIELDBOOK_KEY` / `$FIELDBOOK_SECRET`. An empty value in the file
    /// counts as unset.
    pub fn credentials(&self) -> Result<Credentials, SyncError> {
        self.credentials_with(|name| std::env::var(name).ok())
    }

    /// Like [`credentials`](Self::credentials), reading fallbacks from `env`.
    pub fn credentials_with<E>(&self, env: E) -> Result<Credentials, SyncError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let key = resolve(self.key.as_deref(), KEY_ENV, &env).ok_or_else(|| {
            SyncError::Config(format!("fieldbook.key not set and ${} is empty", KEY_ENV))
        })?;
        let secret = resolve(self.secret.as_deref(), SECRET_ENV, &env).ok_or_else(|| {
            SyncError::Config(format!(
                "fieldbook.secret not set and ${} is empty",
                SECRET_ENV
            ))
        })?;
        Ok(Credentials { key, secret })
    }
}

fn resolve<E>(value: Option<&str>, name: &str, env: &E) -> Option<String>
where
    E: Fn(&str) -> Option<String>,
{
    value
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| env(name).filter(|v| !v.is_empty()))
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct NormalizeConfig {
    /// Characters stripped from words. Defaults to ASCII and typographic
    /// punctuation.
    #[serde(default)]
    pub punctuation: Option<String>,
}

impl Config {
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(
            self.normalize
                .punctuation
                .as_deref()
                .unwrap_or(DEFAULT_PUNCTUATION),
        )
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&content)?;
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.fieldbook.book.trim().is_empty() {
        bail!("fieldbook.book must not be empty");
    }

    let base = &config.fieldbook.base_url;
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        bail!(
            "fieldbook.base_url must start with http:// or https:// (got '{}')",
            base
        );
    }

    if config.fieldbook.sheet.trim().is_empty() {
        bail!("fieldbook.sheet must not be empty");
    }

    if config.fieldbook.timeout_secs == 0 {
        bail!("fieldbook.timeout_secs must be > 0");
    }

    if let Some(p) = &config.normalize.punctuation {
        if p.is_empty() {
            bail!("normalize.punctuation must not be empty when set");
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_defaults() {
        let cfg = parse_config("[fieldbook]\nbook = \"abc123\"\n").unwrap();
        assert_eq!(cfg.fieldbook.base_url, "https://api.fieldbook.com/v1");
        assert_eq!(cfg.fieldbook.sheet, "words");
        assert_eq!(cfg.fieldbook.max_retries, 3);
        assert_eq!(cfg.fieldbook.timeout_secs, 30);
        assert!(cfg.normalize.punctuation.is_none());
    }

    #[test]
    fn rejects_empty_book() {
        let err = parse_config("[fieldbook]\nbook = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("fieldbook.book"));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let toml = "[fieldbook]\nbook = \"b\"\nbase_url = \"ftp://example.com\"\n";
        assert!(parse_config(toml).is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let toml = "[fieldbook]\nbook = \"b\"\ntimeout_secs = 0\n";
        assert!(parse_config(toml).is_err());
    }

    #[test]
    fn rejects_empty_punctuation() {
        let toml = "[fieldbook]\nbook = \"b\"\n[normalize]\npunctuation = \"\"\n";
        assert!(parse_config(toml).is_err());
    }

    #[test]
    fn custom_punctuation_reaches_normalizer() {
        let toml = "[fieldbook]\nbook = \"b\"\n[normalize]\npunctuation = \"!\"\n";
        let cfg = parse_config(toml).unwrap();
        assert_eq!(cfg.normalizer().normalize_text("Hi, there!"), "hi, there");
    }

    #[test]
    fn credentials_from_file() {
        let toml = "[fieldbook]\nbook = \"b\"\nkey = \"k\"\nsecret = \"s\"\n";
        let creds = parse_config(toml).unwrap().fieldbook.credentials().unwrap();
        assert_eq!(creds.key, "k");
        assert_eq!(creds.secret, "s");
    }

    #[test]
    fn empty_key_in_file_falls_back_to_env() {
        let toml = "[fieldbook]\nbook = \"b\"\nkey = \"\"\nsecret = \"s\"\n";
        let cfg = parse_config(toml).unwrap();
        let creds = cfg
            .fieldbook
            .credentials_with(|name| (name == KEY_ENV).then(|| "env-key".to_string()))
            .unwrap();
        assert_eq!(creds.key, "env-key");
        assert_eq!(creds.secret, "s");
    }

    #[test]
    fn missing_secret_is_a_config_error() {
        let toml = "[fieldbook]\nbook = \"b\"\nkey = \"k\"\n";
        let cfg = parse_config(toml).unwrap();
        let err = cfg
            .fieldbook
            .credentials_with(|name| (name == SECRET_ENV).then(String::new))
            .unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
        assert!(err.to_string().contains("fieldbook.secret"));
    }
}
