use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::TranslatorConfig;
use crate::error::{Result, ScriptGenError};
use crate::transcript::TranscriptEntry;

/// Best-effort translation collaborator, implemented by the host
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str)
        -> Result<String>;
}

/// Translate one text, falling back to the original on failure
///
/// The degraded path is an explicit fallback-returning signature: the cause
/// is logged, never swallowed silently, and the caller always gets a value.
pub async fn translate_or_original(
    translator: &dyn Translator,
    text: &str,
    source_lang: &str,
    target_lang: &str,
) -> String {
    match translator.translate(text, source_lang, target_lang).await {
        Ok(translated) => translated,
        Err(e) => {
            warn!("Translation failed, keeping original text: {}", e);
            text.to_string()
        }
    }
}

/// Translate transcript entries independently, preserving order
///
/// Entries are translated concurrently and gathered in input order. A failed
/// entry keeps its original text; offsets and durations are untouched.
pub async fn translate_entries(
    translator: &dyn Translator,
    entries: Vec<TranscriptEntry>,
    source_lang: &str,
    target_lang: &str,
) -> Vec<TranscriptEntry> {
    let translations = futures::future::join_all(
        entries
            .iter()
            .map(|entry| translate_or_original(translator, &entry.text, source_lang, target_lang)),
    )
    .await;

    entries
        .into_iter()
        .zip(translations)
        .map(|(entry, text)| TranscriptEntry { text, ..entry })
        .collect()
}

/// HTTP-backed translator against a configurable endpoint
pub struct HttpTranslator {
    config: TranslatorConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl HttpTranslator {
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ScriptGenError::Upstream(e.to_string()))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String> {
        let endpoint = self
            .config
            .endpoint
            .as_ref()
            .ok_or_else(|| ScriptGenError::Upstream("translator endpoint not configured".to_string()))?;

        debug!("Translating {} chars {}->{}", text.len(), source_lang, target_lang);

        let request = TranslateRequest {
            q: text,
            source: source_lang,
            target: target_lang,
        };

        let response = self
            .client
            .post(endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| ScriptGenError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ScriptGenError::Upstream(format!(
                "translation API returned {}",
                response.status()
            )));
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ScriptGenError::Upstream(e.to_string()))?;

        Ok(body.translated_text)
    }
}
