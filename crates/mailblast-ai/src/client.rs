//! Minimal OpenAI-compatible chat client. Providers differ only by
//! endpoint URL, API key, and model name.

use serde_json::{json, Value};

use mailblast_core::config::AiConfig;
use mailblast_core::error::{MailblastError, Result};

/// Chat-completions client for any OpenAI-compatible endpoint.
pub struct LlmClient {
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

impl LlmClient {
    pub fn from_config(config: &AiConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.key(),
            model: config.model.clone(),
            temperature: config.temperature,
            client: reqwest::Client::new(),
        }
    }

    /// One system + user exchange; returns the assistant text.
    pub async fn chat(&self, system: &str, user: &str) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(MailblastError::ApiKeyMissing("ai".into()));
        }

        let body = json!({
            "model": self.model,
            "temperature": self.temperature,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
        });

        let url = format!("{}/chat/completions", self.base_url);
        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| MailblastError::Http(format!("AI connection failed ({url}): {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(MailblastError::Provider(format!(
                "AI API error {status}: {text}"
            )));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| MailblastError::Http(e.to_string()))?;
        let content = json["choices"]
            .get(0)
            .and_then(|c| c["message"]["content"].as_str())
            .ok_or_else(|| MailblastError::Provider("No choices in response".into()))?;
        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let client = LlmClient::from_config(&AiConfig {
            api_key: String::new(),
            ..AiConfig::default()
        });
        // Only runs offline when no ambient key is set
        if std::env::var("OPENAI_API_KEY").is_ok() || std::env::var("MAILBLAST_AI_KEY").is_ok() {
            return;
        }
        let err = client.chat("sys", "user").await.unwrap_err();
        assert!(matches!(err, MailblastError::ApiKeyMissing(_)));
    }
}
