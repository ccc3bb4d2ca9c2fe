pub mod srt;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{Result, ScriptGenError};

/// One timed caption unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Caption text, never mutated by the pipeline
    pub text: String,

    /// Offset from the start of the video in milliseconds
    pub start_offset_ms: u64,

    /// Display duration in milliseconds
    pub duration_ms: u64,
}

/// A fetched transcript together with the language that produced it
#[derive(Debug, Clone)]
pub struct FetchedTranscript {
    pub entries: Vec<TranscriptEntry>,
    pub language: String,
    /// True when the primary language had no captions and the fallback was used
    pub used_fallback: bool,
}

/// Source of timed transcripts, implemented by the host
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript for a video in the given language
    ///
    /// Fails with [`ScriptGenError::NotFound`] when no captions exist for
    /// that language.
    async fn fetch(&self, video_id: &str, language: &str) -> Result<Vec<TranscriptEntry>>;
}

/// Canonicalize raw fetched entries for the downstream stages
///
/// Entries pass through unmodified; an empty transcript is rejected here so
/// no generator ever sees one.
pub fn normalize(entries: Vec<TranscriptEntry>) -> Result<Vec<TranscriptEntry>> {
    if entries.is_empty() {
        return Err(ScriptGenError::NotFound(
            "字幕データが空です".to_string(),
        ));
    }
    Ok(entries)
}

/// Fetch a transcript in the primary language, falling back once
///
/// A single try/fallback, not a retry loop: the fallback language is
/// attempted at most once and total unavailability propagates as
/// [`ScriptGenError::NotFound`].
pub async fn fetch_with_fallback(
    source: &dyn TranscriptSource,
    video_id: &str,
    primary: &str,
    fallback: &str,
) -> Result<FetchedTranscript> {
    match source.fetch(video_id, primary).await {
        Ok(entries) => Ok(FetchedTranscript {
            entries: normalize(entries)?,
            language: primary.to_string(),
            used_fallback: false,
        }),
        Err(primary_err) => {
            warn!(
                "No {} transcript for {} ({}), trying {}",
                primary, video_id, primary_err, fallback
            );
            match source.fetch(video_id, fallback).await {
                Ok(entries) => Ok(FetchedTranscript {
                    entries: normalize(entries)?,
                    language: fallback.to_string(),
                    used_fallback: true,
                }),
                Err(_) => Err(ScriptGenError::NotFound(format!(
                    "動画 {video_id} の字幕がどの言語でも見つかりませんでした"
                ))),
            }
        }
    }
}

/// HTTP-backed transcript source against a caption API endpoint
pub struct HttpTranscriptSource {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CaptionItem {
    text: String,
    offset: u64,
    duration: u64,
}

impl HttpTranscriptSource {
    pub fn new(endpoint: String, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ScriptGenError::Upstream(e.to_string()))?;

        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl TranscriptSource for HttpTranscriptSource {
    async fn fetch(&self, video_id: &str, language: &str) -> Result<Vec<TranscriptEntry>> {
        debug!("Fetching {} transcript for {}", language, video_id);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("videoId", video_id), ("lang", language)])
            .send()
            .await
            .map_err(|e| ScriptGenError::Upstream(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ScriptGenError::NotFound(format!(
                "{language} captions for {video_id}"
            )));
        }

        if !response.status().is_success() {
            return Err(ScriptGenError::Upstream(format!(
                "caption API returned {}",
                response.status()
            )));
        }

        let items: Vec<CaptionItem> = response
            .json()
            .await
            .map_err(|e| ScriptGenError::Upstream(e.to_string()))?;

        Ok(items
            .into_iter()
            .map(|item| TranscriptEntry {
                text: item.text,
                start_offset_ms: item.offset,
                duration_ms: item.duration,
            })
            .collect())
    }
}

/// Extract a video id from a pasted YouTube URL or bare id
pub fn extract_video_id(input: &str) -> Result<String> {
    let pattern = Regex::new(r"(?:v=|youtu\.be/|/embed/|/v/|/e/|watch\?v=)([^&?#]+)")
        .expect("video id pattern is valid");

    if let Some(captures) = pattern.captures(input) {
        return Ok(captures[1].to_string());
    }

    // Bare ids contain no URL structure at all
    if !input.is_empty() && !input.contains('/') && !input.contains('?') {
        return Ok(input.to_string());
    }

    Err(ScriptGenError::Input(format!(
        "有効なYouTube動画のURLではありません: {input}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticSource {
        ja: Option<Vec<TranscriptEntry>>,
        en: Option<Vec<TranscriptEntry>>,
    }

    #[async_trait]
    impl TranscriptSource for StaticSource {
        async fn fetch(&self, _video_id: &str, language: &str) -> Result<Vec<TranscriptEntry>> {
            let entries = match language {
                "ja" => self.ja.clone(),
                "en" => self.en.clone(),
                _ => None,
            };
            entries.ok_or_else(|| ScriptGenError::NotFound(language.to_string()))
        }
    }

    fn entry(text: &str, offset: u64) -> TranscriptEntry {
        TranscriptEntry {
            text: text.to_string(),
            start_offset_ms: offset,
            duration_ms: 1000,
        }
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(matches!(
            normalize(vec![]),
            Err(ScriptGenError::NotFound(_))
        ));
    }

    #[test]
    fn test_normalize_preserves_entries() {
        let entries = vec![entry("a", 0), entry("b", 1000)];
        let normalized = normalize(entries.clone()).unwrap();
        assert_eq!(normalized, entries);
    }

    #[tokio::test]
    async fn test_fetch_prefers_primary_language() {
        let source = StaticSource {
            ja: Some(vec![entry("こんにちは", 0)]),
            en: Some(vec![entry("hello", 0)]),
        };

        let fetched = fetch_with_fallback(&source, "vid", "ja", "en").await.unwrap();
        assert_eq!(fetched.language, "ja");
        assert!(!fetched.used_fallback);
        assert_eq!(fetched.entries[0].text, "こんにちは");
    }

    #[tokio::test]
    async fn test_fetch_falls_back_once() {
        let source = StaticSource {
            ja: None,
            en: Some(vec![entry("hello", 0)]),
        };

        let fetched = fetch_with_fallback(&source, "vid", "ja", "en").await.unwrap();
        assert_eq!(fetched.language, "en");
        assert!(fetched.used_fallback);
    }

    #[tokio::test]
    async fn test_fetch_total_failure_is_not_found() {
        let source = StaticSource { ja: None, en: None };
        let result = fetch_with_fallback(&source, "vid", "ja", "en").await;
        assert!(matches!(result, Err(ScriptGenError::NotFound(_))));
    }

    #[test]
    fn test_extract_video_id_from_urls() {
        for url in [
            "https://www.youtube.com/watch?v=abc123XYZ",
            "https://youtu.be/abc123XYZ",
            "https://www.youtube.com/embed/abc123XYZ",
        ] {
            assert_eq!(extract_video_id(url).unwrap(), "abc123XYZ");
        }
    }

    #[test]
    fn test_extract_video_id_bare_and_invalid() {
        assert_eq!(extract_video_id("abc123XYZ").unwrap(), "abc123XYZ");
        assert!(extract_video_id("https://example.com/watch").is_err());
        assert!(extract_video_id("").is_err());
    }
}
