use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transcript::TranscriptEntry;

/// SRT (SubRip Subtitle) block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SrtBlock {
    /// Sequential number, 1-based
    pub index: u32,
    /// Start offset in milliseconds
    pub start_ms: u64,
    /// End offset in milliseconds
    pub end_ms: u64,
    /// Subtitle text
    pub text: String,
}

impl fmt::Display for SrtBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{} --> {}\n{}\n",
            self.index,
            format_offset_srt(self.start_ms),
            format_offset_srt(self.end_ms),
            self.text
        )
    }
}

/// Render transcript entries as an SRT document
pub fn export_srt(entries: &[TranscriptEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            SrtBlock {
                index: (i + 1) as u32,
                start_ms: entry.start_offset_ms,
                end_ms: entry.start_offset_ms + entry.duration_ms,
                text: entry.text.clone(),
            }
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render transcript entries as plain text, one entry per line
pub fn export_text(entries: &[TranscriptEntry]) -> String {
    entries
        .iter()
        .map(|e| e.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Suggested filename for an SRT transcript export
///
/// The safe title is caller-supplied and passed through unsanitized.
pub fn srt_filename(safe_title: &str) -> String {
    format!("{safe_title}_transcript.srt")
}

/// Suggested filename for a plain-text transcript export
pub fn text_filename(safe_title: &str) -> String {
    format!("{safe_title}.txt")
}

/// Format a millisecond offset as an SRT timestamp (HH:MM:SS,cc)
///
/// Centisecond precision: milliseconds / 10, floored.
pub fn format_offset_srt(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    let centiseconds = (ms % 1000) / 10;

    format!("{hours:02}:{minutes:02}:{seconds:02},{centiseconds:02}")
}

/// Format a millisecond offset as a YouTube-style timecode (M:SS)
pub fn format_offset_mmss(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes}:{seconds:02}")
}

/// Format a duration in milliseconds as Japanese minutes/seconds
pub fn format_duration_jp(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes}分{seconds}秒")
}
