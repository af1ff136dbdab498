use crate::error::{GitAiError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const API_KEY_ENV: &str = "GIT_AI_API_KEY";
const MODEL_ENV: &str = "GIT_AI_MODEL";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub api_url: Option<String>,
}

impl Config {
    pub fn default_model() -> &'static str {
        "gpt-4o-mini"
    }

    pub fn default_api_url() -> &'static str {
        "https://api.openai.com/v1/chat/completions"
    }

    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| Self::default_model())
    }

    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or_else(|| Self::default_api_url())
    }
}

fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| GitAiError::IoError("Could not locate config directory".to_string()))?;
    Ok(base.join("git-ai"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn load() -> Result<Config> {
    load_from(&config_path()?)
}

pub fn load_from(path: &Path) -> Result<Config> {
    if path.exists() {
        let text = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text)?;
        return Ok(config);
    }
    Ok(Config::default())
}

pub fn save_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let text = toml::to_string_pretty(config)
        .map_err(|e| GitAiError::IoError(format!("Failed to serialize config: {}", e)))?;
    fs::write(path, text)?;
    Ok(())
}

// Empty variables are ignored.
pub fn effective_api_key(config: &Config) -> Option<String> {
    non_empty_env(API_KEY_ENV).or_else(|| config.api_key.clone())
}

pub fn effective_model(config: &Config) -> String {
    non_empty_env(MODEL_ENV).unwrap_or_else(|| config.model().to_string())
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

const MIN_PARTIALLY_SHOWN_KEY: usize = 12;

// Keys too short to hide most of their length are masked completely.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() < MIN_PARTIALLY_SHOWN_KEY {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = load_from(&dir.path().join("absent.toml"))?;

        assert_eq!(config, Config::default());
        assert_eq!(config.model(), Config::default_model());
        assert_eq!(config.api_url(), Config::default_api_url());
        Ok(())
    }

    #[test]
    fn saved_config_loads_back() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested/config.toml");
        let config = Config {
            api_key: Some("sk-test".to_string()),
            model: Some("llama3".to_string()),
            api_url: Some("http://localhost:11434/v1/chat/completions".to_string()),
        };

        save_to(&path, &config)?;
        assert_eq!(load_from(&path)?, config);
        Ok(())
    }

    #[test]
    fn malformed_file_is_a_config_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [")?;

        let err = load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Config parse error"));
        Ok(())
    }

    #[test]
    fn stored_values_are_used_without_env() {
        let config = Config {
            api_key: Some("stored".to_string()),
            model: Some("stored-model".to_string()),
            api_url: None,
        };
        temp_env::with_vars_unset([API_KEY_ENV, MODEL_ENV], || {
            assert_eq!(effective_api_key(&config).as_deref(), Some("stored"));
            assert_eq!(effective_model(&config), "stored-model");
        });
    }

    #[test]
    fn env_overrides_stored_values() {
        let config = Config {
            api_key: Some("stored".to_string()),
            model: None,
            api_url: None,
        };
        temp_env::with_vars(
            [(API_KEY_ENV, Some("from-env")), (MODEL_ENV, Some("env-model"))],
            || {
                assert_eq!(effective_api_key(&config).as_deref(), Some("from-env"));
                assert_eq!(effective_model(&config), "env-model");
            },
        );
    }

    #[test]
    fn empty_env_key_falls_back_to_stored() {
        let config = Config {
            api_key: Some("stored".to_string()),
            model: None,
            api_url: None,
        };
        temp_env::with_var(API_KEY_ENV, Some(""), || {
            assert_eq!(effective_api_key(&config).as_deref(), Some("stored"));
        });
    }

    #[test]
    fn mask_key_hides_the_middle() {
        assert_eq!(mask_key("sk-1234567890abcd"), "sk-1...abcd");
        assert_eq!(mask_key("short"), "*****");
    }

    #[test]
    fn short_keys_reveal_nothing() {
        assert_eq!(mask_key("sk-abcdef"), "*********");
        assert_eq!(mask_key("sk-abcdefgh"), "***********");
        assert_eq!(mask_key("sk-abcdefghi"), "sk-a...fghi");
    }
}
