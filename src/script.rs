use serde::{Deserialize, Serialize};

use crate::error::{Result, ScriptGenError};
use crate::outline::{Outline, OutlineSection, Subsection, SubsectionRole};
use crate::summary::Summary;
use crate::transcript::srt::{format_duration_jp, format_offset_mmss};
use crate::transcript::TranscriptEntry;

/// One rendered script section bound to a contiguous transcript slice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptSection {
    pub title: String,
    pub content: String,
    /// M:SS offset of the first transcript entry in the section
    pub timestamp_label: String,
    /// Sum of the section's entry durations
    pub duration_ms: u64,
}

/// Synthesize script sections by binding transcript chunks to the outline
///
/// Entries are partitioned into contiguous chunks of `ceil(len / sections)`;
/// chunk i binds to section i. A transcript too short to give every section
/// at least one entry fails with [`ScriptGenError::InternalInvariant`].
pub fn generate(
    entries: &[TranscriptEntry],
    outline: &Outline,
    summary: &Summary,
) -> Result<Vec<ScriptSection>> {
    let section_count = outline.sections.len();
    let items_per_section = entries.len().div_ceil(section_count);

    let mut sections = Vec::with_capacity(section_count);

    for (index, outline_section) in outline.sections.iter().enumerate() {
        let start = index * items_per_section;
        let end = ((index + 1) * items_per_section).min(entries.len());

        if start >= end {
            return Err(ScriptGenError::InternalInvariant(format!(
                "insufficient transcript length for outline section count \
                 ({} entries, section {} of {} is empty)",
                entries.len(),
                index + 1,
                section_count
            )));
        }

        let chunk = &entries[start..end];
        let content = section_content(outline_section, summary, index == 0);

        sections.push(ScriptSection {
            title: outline_section.title.clone(),
            content,
            timestamp_label: format_offset_mmss(chunk[0].start_offset_ms),
            duration_ms: chunk.iter().map(|e| e.duration_ms).sum(),
        });
    }

    Ok(sections)
}

fn section_content(section: &OutlineSection, summary: &Summary, is_first: bool) -> String {
    let mut content = String::new();

    if is_first {
        content.push_str(&introduction(summary));
    }

    for subsection in &section.subsections {
        content.push_str(&format!("\n【{}】\n", subsection.title));
        content.push_str(&subsection_content(subsection, summary));
    }

    content
}

/// One-time introduction block for the first section
fn introduction(summary: &Summary) -> String {
    format!(
        "皆さん、こんにちは。今回は非常に重要な情報をお伝えします。\n\n\
         {}による衝撃的な予言について、詳しく検証していきます。\n\
         この内容は、私たちの未来に大きな影響を与える可能性があります。\n\n",
        summary.subject.name
    )
}

/// Base templated content plus the subsection's role-keyed clauses
///
/// Roles were decided at outline construction; matching clauses are appended
/// in the fixed order Warning → Analysis → Action.
fn subsection_content(subsection: &Subsection, summary: &Summary) -> String {
    let mut content = format!("{}\n\n", subsection.content);

    if subsection.roles.contains(&SubsectionRole::Warning) {
        if let Some(disasters) = &summary.predictions.disasters {
            content.push_str(&format!(
                "特に注目すべき点は、{}に{}で予測される出来事です。\n",
                disasters.timing, disasters.location
            ));
        }
    }

    if subsection.roles.contains(&SubsectionRole::Analysis) {
        content.push_str(&format!(
            "これらの予測は、{}といった特徴を持っています。\n",
            summary.characteristics.join("、")
        ));
    }

    if subsection.roles.contains(&SubsectionRole::Action) {
        content.push_str("具体的な対応として、以下の点に注目してください：\n");
        content.push_str(
            &summary
                .details
                .iter()
                .map(|detail| format!("・{detail}"))
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }

    content
}

/// Render script sections as the full-script text document
pub fn format_full_script(sections: &[ScriptSection]) -> String {
    let mut out = String::from("=== 完全版動画台本 ===\n\n");

    for (index, section) in sections.iter().enumerate() {
        out.push_str(&format!("### {} ###\n", section.title));
        out.push_str(&format!(
            "[{}] ({})\n\n",
            section.timestamp_label,
            format_duration_jp(section.duration_ms)
        ));
        out.push_str(&format!("{}\n\n", section.content));

        if index < sections.len() - 1 {
            out.push_str("---\n\n");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline;
    use crate::summary;

    fn entries(count: usize, spacing_ms: u64) -> Vec<TranscriptEntry> {
        (0..count)
            .map(|i| TranscriptEntry {
                text: format!("字幕{i}"),
                start_offset_ms: i as u64 * spacing_ms,
                duration_ms: spacing_ms,
            })
            .collect()
    }

    fn fixtures(count: usize) -> (Vec<TranscriptEntry>, Outline, Summary) {
        let entries = entries(count, 5000);
        let summary = summary::extract(&entries);
        let outline = outline::generate(&summary, "タイトル");
        (entries, outline, summary)
    }

    #[test]
    fn test_partition_covers_entries_in_order() {
        let (entries, outline, summary) = fixtures(27);
        let sections = generate(&entries, &outline, &summary).unwrap();

        assert_eq!(sections.len(), 9);
        // ceil(27/9) = 3 entries per chunk, 5000ms each
        for section in &sections {
            assert_eq!(section.duration_ms, 15_000);
        }
        // First entry of chunk i starts at i * 3 * 5000ms
        assert_eq!(sections[0].timestamp_label, "0:00");
        assert_eq!(sections[1].timestamp_label, "0:15");
        assert_eq!(sections[8].timestamp_label, "2:00");
        // Total durations account for every entry exactly once
        let total: u64 = sections.iter().map(|s| s.duration_ms).sum();
        assert_eq!(total, 27 * 5000);
    }

    #[test]
    fn test_short_transcript_fails_invariant() {
        // 21 entries over 9 sections: chunks of 3 exhaust the transcript
        // after section 7, leaving sections 8 and 9 empty
        let (entries, outline, summary) = fixtures(21);
        let result = generate(&entries, &outline, &summary);

        match result {
            Err(ScriptGenError::InternalInvariant(msg)) => {
                assert!(msg.contains("section 8"), "unexpected message: {msg}");
            }
            other => panic!("expected InternalInvariant, got {other:?}"),
        }
    }

    #[test]
    fn test_single_entry_per_section_is_enough() {
        let (entries, outline, summary) = fixtures(9);
        let sections = generate(&entries, &outline, &summary).unwrap();
        assert_eq!(sections.len(), 9);
        assert_eq!(sections[8].duration_ms, 5000);
    }

    #[test]
    fn test_introduction_only_in_first_section() {
        let (entries, outline, summary) = fixtures(18);
        let sections = generate(&entries, &outline, &summary).unwrap();

        assert!(sections[0].content.contains("皆さん、こんにちは"));
        for section in &sections[1..] {
            assert!(!section.content.contains("皆さん、こんにちは"));
        }
    }

    #[test]
    fn test_warning_clause_appended() {
        let (entries, outline, summary) = fixtures(18);
        let sections = generate(&entries, &outline, &summary).unwrap();

        // Section 3 holds the 【警告の本質】 subsection
        let disasters = summary.predictions.disasters.as_ref().unwrap();
        assert!(sections[2].content.contains(&format!(
            "特に注目すべき点は、{}に{}で予測される出来事です。",
            disasters.timing, disasters.location
        )));
    }

    #[test]
    fn test_warning_clause_skipped_without_disasters() {
        let (entries, mut outline, mut summary) = fixtures(18);
        summary.predictions.disasters = None;
        outline = outline::generate(&summary, "タイトル");

        let sections = generate(&entries, &outline, &summary).unwrap();
        assert!(!sections[2].content.contains("特に注目すべき点は"));
    }

    #[test]
    fn test_analysis_and_action_clauses() {
        let (entries, outline, summary) = fixtures(18);
        let sections = generate(&entries, &outline, &summary).unwrap();

        // 【データ分析】 in section 4
        assert!(sections[3]
            .content
            .contains("これらの予測は、"));
        // 【対策の方向性】 in section 5 appends the details bullet block
        assert!(sections[4]
            .content
            .contains("具体的な対応として、以下の点に注目してください："));
        for detail in &summary.details {
            assert!(sections[4].content.contains(&format!("・{detail}")));
        }
    }

    #[test]
    fn test_format_full_script_layout() {
        let (entries, outline, summary) = fixtures(18);
        let sections = generate(&entries, &outline, &summary).unwrap();
        let formatted = format_full_script(&sections);

        assert!(formatted.starts_with("=== 完全版動画台本 ===\n\n"));
        assert!(formatted.contains("### 『謎の予言者の出現』 ###"));
        assert!(formatted.contains("[0:00]"));
        assert_eq!(formatted.matches("---\n\n").count(), 8);
    }
}
