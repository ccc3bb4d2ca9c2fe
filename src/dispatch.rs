use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Result, ScriptGenError};
use crate::narration;
use crate::outline;
use crate::script;
use crate::styling;
use crate::summary;
use crate::title;
use crate::transcript::srt::{format_duration_jp, format_offset_mmss};
use crate::transcript::{self, TranscriptEntry, TranscriptSource};
use crate::translate::{self, Translator};

/// Requested output kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptFormat {
    /// Entry texts joined by blank lines
    Default,
    /// Timecoded subtitle lines
    Subtitle,
    /// Movie-script style with scene numbers
    Scene,
    /// Narration lines labeled with display durations
    DurationLabeled,
    /// Structured summary document
    Summary,
    /// Generated title plus the summary it came from
    Title,
    /// Nine-section outline
    Outline,
    /// Full nine-section script with timestamps
    FullScript,
    /// Seven-segment structured-prompt script
    StructuredPrompt,
    /// Opening narration
    Opening,
    /// Ending narration
    Ending,
}

impl ScriptFormat {
    /// Parse a format identifier; unrecognized identifiers fall back to
    /// [`ScriptFormat::Default`] rather than erroring
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            "youtube" => Self::Subtitle,
            "movie" => Self::Scene,
            "narration" => Self::DurationLabeled,
            "summary" => Self::Summary,
            "title" => Self::Title,
            "outline" => Self::Outline,
            "full" => Self::FullScript,
            "hiroshi" => Self::StructuredPrompt,
            "opening" => Self::Opening,
            "ending" => Self::Ending,
            _ => Self::Default,
        }
    }

    /// Canonical identifier used in suggested filenames
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Subtitle => "youtube",
            Self::Scene => "movie",
            Self::DurationLabeled => "narration",
            Self::Summary => "summary",
            Self::Title => "title",
            Self::Outline => "outline",
            Self::FullScript => "full",
            Self::StructuredPrompt => "hiroshi",
            Self::Opening => "opening",
            Self::Ending => "ending",
        }
    }
}

/// A finished artifact with its download filename
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub content: String,
    pub suggested_filename: String,
}

/// Maps a requested format to its generator chain and styles the result
pub struct ScriptGenerator {
    config: Config,
}

impl ScriptGenerator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Synthesize the requested artifact from normalized transcript entries
    ///
    /// Every format finishes with the styling pipeline. Fails only on an
    /// empty transcript or the section-chunking guard; generators themselves
    /// are total.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        entries: &[TranscriptEntry],
        format: ScriptFormat,
        video_id: &str,
        rng: &mut R,
    ) -> Result<GeneratedDocument> {
        if entries.is_empty() {
            return Err(ScriptGenError::NotFound(
                "字幕データが空です".to_string(),
            ));
        }

        debug!("Generating {} artifact for {}", format.identifier(), video_id);

        let raw = match format {
            ScriptFormat::Default => entries
                .iter()
                .map(|e| e.text.clone())
                .collect::<Vec<_>>()
                .join("\n\n"),

            ScriptFormat::Subtitle => entries
                .iter()
                .map(|e| format!("[{}]\n{}\n\n", format_offset_mmss(e.start_offset_ms), e.text))
                .collect(),

            ScriptFormat::Scene => entries
                .iter()
                .enumerate()
                .map(|(i, e)| format!("シーン {}\n{}\n\n", i / 5 + 1, e.text))
                .collect(),

            ScriptFormat::DurationLabeled => entries
                .iter()
                .map(|e| format!("（{}）\n{}\n\n", format_duration_jp(e.duration_ms), e.text))
                .collect(),

            ScriptFormat::Summary => summary::format_summary(&summary::extract(entries)),

            ScriptFormat::Title => {
                let content_summary = summary::extract(entries);
                let generated = title::generate(&content_summary, &self.config.title, rng);
                format!(
                    "=== 生成されたタイトル ===\n\n{}\n\n元の内容の要約：\n{}",
                    generated,
                    summary::format_summary(&content_summary)
                )
            }

            ScriptFormat::Outline => {
                let content_summary = summary::extract(entries);
                let generated = title::generate(&content_summary, &self.config.title, rng);
                outline::format_outline(&outline::generate(&content_summary, &generated))
            }

            ScriptFormat::FullScript => {
                let content_summary = summary::extract(entries);
                let generated = title::generate(&content_summary, &self.config.title, rng);
                let script_outline = outline::generate(&content_summary, &generated);
                let sections = script::generate(entries, &script_outline, &content_summary)?;
                script::format_full_script(&sections)
            }

            ScriptFormat::StructuredPrompt => self.structured_prompt(entries),

            ScriptFormat::Opening => {
                narration::generate_opening(&summary::extract(entries), rng)
            }

            ScriptFormat::Ending => narration::generate_ending(&summary::extract(entries)),
        };

        let content = styling::apply_all(raw, format, &self.config);

        Ok(GeneratedDocument {
            content,
            suggested_filename: format!("script_{}_{}.txt", video_id, format.identifier()),
        })
    }

    /// Seven-segment script keyed to the structured prompts
    ///
    /// Total even when the configured prompt list is empty: degrades to the
    /// header block with zero segments instead of panicking.
    fn structured_prompt(&self, entries: &[TranscriptEntry]) -> String {
        let prompts = &self.config.structured_prompts;
        let total_duration: u64 = entries.iter().map(|e| e.duration_ms).sum();

        let mut out = String::from("=== ひろし式動画台本 ===\n\n");
        out.push_str(&format!("動画時間: {}\n", format_duration_jp(total_duration)));
        out.push_str(&format!("セグメント数: {}\n", prompts.len()));

        if prompts.is_empty() {
            out.push('\n');
            return out;
        }

        let segment_size = entries.len().div_ceil(prompts.len());
        out.push_str(&format!(
            "各セグメント平均時間: {}\n\n",
            format_duration_jp(total_duration / prompts.len() as u64)
        ));

        for (index, prompt) in prompts.iter().enumerate() {
            let start = (index * segment_size).min(entries.len());
            let end = ((index + 1) * segment_size).min(entries.len());

            out.push_str(&format!("### {prompt} ###\n\n"));
            for entry in &entries[start..end] {
                out.push_str(&format!(
                    "[{}] {}\n",
                    format_offset_mmss(entry.start_offset_ms),
                    entry.text
                ));
            }
            out.push('\n');
        }

        out
    }

    /// Full request flow: fetch with language fallback, translate when the
    /// fallback language was used, then synthesize the artifact
    ///
    /// The request completes or fails atomically; no partial document is
    /// ever returned.
    pub async fn run<R: Rng + ?Sized>(
        &self,
        source: &dyn TranscriptSource,
        translator: Option<&dyn Translator>,
        video_id: &str,
        format: ScriptFormat,
        rng: &mut R,
    ) -> Result<GeneratedDocument> {
        if video_id.is_empty() {
            return Err(ScriptGenError::Input(
                "動画IDが指定されていません".to_string(),
            ));
        }

        let fetched = transcript::fetch_with_fallback(
            source,
            video_id,
            &self.config.languages.primary,
            &self.config.languages.fallback,
        )
        .await?;

        let entries = match translator {
            Some(translator) if fetched.used_fallback => {
                info!(
                    "Translating {} fallback entries {} -> {}",
                    fetched.entries.len(),
                    fetched.language,
                    self.config.languages.primary
                );
                translate::translate_entries(
                    translator,
                    fetched.entries,
                    &fetched.language,
                    &self.config.languages.primary,
                )
                .await
            }
            _ => fetched.entries,
        };

        self.generate(&entries, format, video_id, rng)
    }
}
