use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::error::{Result, ScriptGenError};

/// Optional LLM enrichment collaborator
///
/// Not part of any default generator chain; the host may run a finished
/// document through it for polish. Failures degrade to the original text.
#[async_trait]
pub trait Llm: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Run a prompt through the LLM, returning the original text on failure
pub async fn enrich_or_original(llm: &dyn Llm, prompt: &str, original: &str) -> String {
    match llm.generate(prompt).await {
        Ok(generated) => generated,
        Err(e) => {
            warn!("LLM enrichment failed, keeping original content: {}", e);
            original.to_string()
        }
    }
}

/// Chat-completions-style HTTP provider
pub struct HttpLlmProvider {
    config: LlmConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl HttpLlmProvider {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ScriptGenError::Upstream(e.to_string()))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl Llm for HttpLlmProvider {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let endpoint = self
            .config
            .endpoint
            .as_ref()
            .ok_or_else(|| ScriptGenError::Upstream("LLM endpoint not configured".to_string()))?;

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Sending prompt to LLM at {}", endpoint);

        let response = self
            .client
            .post(endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| ScriptGenError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ScriptGenError::Upstream(format!(
                "LLM API returned {}",
                response.status()
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ScriptGenError::Upstream(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ScriptGenError::Upstream("empty LLM response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingLlm;

    #[async_trait]
    impl Llm for FailingLlm {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(ScriptGenError::Upstream("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_enrich_degrades_to_original() {
        let out = enrich_or_original(&FailingLlm, "polish this", "original text").await;
        assert_eq!(out, "original text");
    }

    #[tokio::test]
    async fn test_provider_requires_endpoint() {
        let provider = HttpLlmProvider::new(LlmConfig {
            endpoint: None,
            model: "local-model".to_string(),
            max_tokens: 128,
            temperature: 0.1,
            timeout_seconds: 5,
        })
        .unwrap();

        assert!(provider.generate("prompt").await.is_err());
    }
}
