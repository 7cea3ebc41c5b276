//! MailBlast configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailblastConfig {
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub sender: SenderConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for MailblastConfig {
    fn default() -> Self {
        Self {
            dashboard: DashboardConfig::default(),
            sender: SenderConfig::default(),
            delivery: DeliveryConfig::default(),
            ai: AiConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl MailblastConfig {
    /// Load config from the default path (~/.mailblast/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::MailblastError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::error::MailblastError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::MailblastError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mailblast")
            .join("config.toml")
    }

    /// Get the MailBlast home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mailblast")
    }
}

/// Dashboard server + operator login configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Single-operator login. Change the password after first run.
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 3000 }
fn default_username() -> String { "admin".into() }
fn default_password() -> String { "MailBlast@2026".into() }

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: default_username(),
            password: default_password(),
        }
    }
}

/// Sender identity defaults used to prefill the compose form.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SenderConfig {
    /// From address. Must contain '@' before a campaign can start.
    #[serde(default)]
    pub from: String,
    /// Default subject line.
    #[serde(default)]
    pub subject: String,
}

/// Outbound delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Active mailer backend: "resend", "smtp", or "stub".
    #[serde(default = "default_delivery_provider")]
    pub provider: String,
    #[serde(default)]
    pub resend_api_key: String,
    #[serde(default)]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_user: String,
    #[serde(default)]
    pub smtp_password: String,
}

fn default_delivery_provider() -> String { "resend".into() }
fn default_smtp_port() -> u16 { 587 }

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            provider: default_delivery_provider(),
            resend_api_key: String::new(),
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_user: String::new(),
            smtp_password: String::new(),
        }
    }
}

impl DeliveryConfig {
    /// Resend API key, falling back to environment variables.
    pub fn resend_key(&self) -> String {
        if !self.resend_api_key.is_empty() {
            return self.resend_api_key.clone();
        }
        std::env::var("MAILBLAST_RESEND_KEY")
            .or_else(|_| std::env::var("RESEND_API_KEY"))
            .unwrap_or_default()
    }
}

/// AI provider configuration (OpenAI-compatible chat endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_ai_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_ai_base_url() -> String { "https://api.openai.com/v1".into() }
fn default_ai_model() -> String { "gpt-4o-mini".into() }
fn default_temperature() -> f32 { 0.7 }

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: default_ai_base_url(),
            api_key: String::new(),
            model: default_ai_model(),
            temperature: default_temperature(),
        }
    }
}

impl AiConfig {
    /// API key, falling back to environment variables.
    pub fn key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        std::env::var("MAILBLAST_AI_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .unwrap_or_default()
    }
}

/// Snapshot storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// "file" (one JSON file per key) or "sqlite".
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_storage_backend() -> String { "file".into() }
fn default_data_dir() -> String { "~/.mailblast/data".into() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            data_dir: default_data_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MailblastConfig::default();
        assert_eq!(config.dashboard.port, 3000);
        assert_eq!(config.dashboard.username, "admin");
        assert_eq!(config.delivery.provider, "resend");
        assert_eq!(config.storage.backend, "file");
        assert_eq!(config.ai.model, "gpt-4o-mini");
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
            [dashboard]
            port = 8080
            username = "operator"

            [sender]
            from = "team@example.com"
            subject = "Hello from MailBlast"

            [delivery]
            provider = "smtp"
            smtp_host = "smtp.example.com"
        "#;

        let config: MailblastConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.dashboard.port, 8080);
        assert_eq!(config.dashboard.username, "operator");
        assert_eq!(config.sender.from, "team@example.com");
        assert_eq!(config.delivery.provider, "smtp");
        assert_eq!(config.delivery.smtp_port, 587);
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let toml_str = "";
        let config: MailblastConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.dashboard.host, "127.0.0.1");
        assert_eq!(config.storage.data_dir, "~/.mailblast/data");
    }

    #[test]
    fn test_home_dir() {
        let home = MailblastConfig::home_dir();
        assert!(home.to_string_lossy().contains("mailblast"));
    }
}
