use serde::{Deserialize, Serialize};

use crate::summary::Summary;

/// Number of sections in the narrative skeleton
pub const SECTION_COUNT: usize = 9;

/// Fallback phrases for absent prediction categories
pub const FALLBACK_CRISIS: &str = "未知の危機の可能性";
pub const FALLBACK_REGIONAL: &str = "予測される国内の変動";
pub const FALLBACK_TIMING: &str = "不明な時期";
pub const FALLBACK_LOCATION: &str = "不明な地域";

/// Editorial role of a subsection, decided once at outline construction
///
/// The script generator appends role-keyed clauses in the fixed order
/// Warning → Analysis → Action; a subsection can carry several roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubsectionRole {
    Warning,
    Analysis,
    Action,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subsection {
    pub title: String,
    pub content: String,
    pub roles: Vec<SubsectionRole>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineSection {
    pub title: String,
    pub subsections: Vec<Subsection>,
}

/// Fixed nine-section narrative skeleton
///
/// Section and subsection titles are static narrative labels; only the
/// content strings are parameterized by the summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outline {
    pub sections: Vec<OutlineSection>,
}

/// Build the nine-section outline for a summary
///
/// Structure is invariant: always 9 sections of 2 subsections each. Absent
/// prediction categories degrade to fixed fallback phrases.
pub fn generate(summary: &Summary, _title: &str) -> Outline {
    let disasters = summary.predictions.disasters.as_ref();

    let crisis_content = disasters
        .map(|d| d.details.join("、"))
        .unwrap_or_else(|| FALLBACK_CRISIS.to_string());
    let location = disasters
        .map(|d| d.location.as_str())
        .unwrap_or(FALLBACK_LOCATION);
    let timing = disasters
        .map(|d| d.timing.as_str())
        .unwrap_or(FALLBACK_TIMING);
    let regional_content = summary
        .predictions
        .regional
        .as_ref()
        .map(|r| r.details.join("、"))
        .unwrap_or_else(|| FALLBACK_REGIONAL.to_string());

    let first_trait = summary
        .subject
        .traits_
        .first()
        .cloned()
        .unwrap_or_default();

    let sections = vec![
        section(
            "『謎の予言者の出現』",
            subsection(
                "【衝撃の第一発見】",
                format!(
                    "予言者{}の突然の登場と、その背景にある{}",
                    summary.subject.name, first_trait
                ),
            ),
            subsection(
                "【信憑性の証明】",
                format!("{}による予言の裏付け", summary.subject.achievements.join("、")),
            ),
        ),
        section(
            "『歴史的な予言の連鎖』",
            subsection("【過去の的中例】", "これまでの予言が示した驚くべき正確性".to_string()),
            subsection("【現代との関連性】", "現代社会に対する重要な示唆".to_string()),
        ),
        section(
            "『迫り来る危機の正体』",
            subsection("【警告の本質】", crisis_content),
            subsection("【影響の範囲】", format!("{location}における具体的な影響")),
        ),
        section(
            "『科学的な検証結果』",
            subsection("【データ分析】", "予言の科学的根拠と検証プロセス".to_string()),
            subsection("【専門家の見解】", "各分野の専門家による考察".to_string()),
        ),
        section(
            "『日本への具体的影響』",
            subsection("【国内の変化】", regional_content),
            subsection("【対策の方向性】", "取るべき具体的な準備と対応".to_string()),
        ),
        section(
            "『世界規模の展開シナリオ』",
            subsection("【連鎖的影響】", "グローバルな影響の連鎖的な広がり".to_string()),
            subsection("【時系列予測】", format!("{timing}から始まる変化の過程")),
        ),
        section(
            "『意外な真実の発覚』",
            subsection("【隠された事実】", "これまで明かされなかった重要な発見".to_string()),
            subsection("【新たな視点】", "従来の解釈を覆す新しい考察".to_string()),
        ),
        section(
            "『具体的な対処法』",
            subsection("【個人レベル】", "個人で実践できる具体的な対策".to_string()),
            subsection("【社会レベル】", "社会全体で取り組むべき方向性".to_string()),
        ),
        section(
            "『希望への道筋』",
            subsection("【展望と可能性】", "危機を乗り越えた先にある未来像".to_string()),
            subsection("【具体的なアクション】", "視聴者が今すぐ始められる行動指針".to_string()),
        ),
    ];

    Outline { sections }
}

fn section(title: &str, first: Subsection, second: Subsection) -> OutlineSection {
    OutlineSection {
        title: title.to_string(),
        subsections: vec![first, second],
    }
}

fn subsection(title: &str, content: String) -> Subsection {
    Subsection {
        roles: roles_for_title(title),
        title: title.to_string(),
        content,
    }
}

/// Derive editorial roles from a subsection label
///
/// The substring rules are evaluated independently, so a label can carry
/// multiple roles; the resulting set is ordered Warning → Analysis → Action.
fn roles_for_title(title: &str) -> Vec<SubsectionRole> {
    let mut roles = Vec::new();
    if title.contains("警告") {
        roles.push(SubsectionRole::Warning);
    }
    if title.contains("検証") || title.contains("分析") {
        roles.push(SubsectionRole::Analysis);
    }
    if title.contains("対策") || title.contains("アクション") {
        roles.push(SubsectionRole::Action);
    }
    roles
}

/// Render an outline as the numbered text document
pub fn format_outline(outline: &Outline) -> String {
    let mut out = String::from("=== 動画アウトライン ===\n\n");

    for (i, section) in outline.sections.iter().enumerate() {
        out.push_str(&format!("{}.{}\n\n", i + 1, section.title));

        for (j, subsection) in section.subsections.iter().enumerate() {
            out.push_str(&format!("{}-{}.{}\n", i + 1, j + 1, subsection.title));
            out.push_str(&format!("{}\n\n", subsection.content));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary;
    use crate::transcript::TranscriptEntry;

    fn sample_summary() -> Summary {
        summary::extract(&[TranscriptEntry {
            text: "予言".to_string(),
            start_offset_ms: 0,
            duration_ms: 1000,
        }])
    }

    #[test]
    fn test_structure_is_invariant() {
        let outline = generate(&sample_summary(), "タイトル");
        assert_eq!(outline.sections.len(), SECTION_COUNT);
        for section in &outline.sections {
            assert_eq!(section.subsections.len(), 2);
        }

        // Still 9x2 when every optional category is missing
        let mut bare = sample_summary();
        bare.predictions = Default::default();
        let outline = generate(&bare, "タイトル");
        assert_eq!(outline.sections.len(), SECTION_COUNT);
        for section in &outline.sections {
            assert_eq!(section.subsections.len(), 2);
        }
    }

    #[test]
    fn test_missing_disasters_uses_fallback_phrase() {
        let mut summary = sample_summary();
        summary.predictions.disasters = None;

        let outline = generate(&summary, "タイトル");
        assert_eq!(outline.sections[2].subsections[0].content, FALLBACK_CRISIS);
        assert_eq!(
            outline.sections[2].subsections[1].content,
            format!("{FALLBACK_LOCATION}における具体的な影響")
        );
        assert_eq!(
            outline.sections[5].subsections[1].content,
            format!("{FALLBACK_TIMING}から始まる変化の過程")
        );
    }

    #[test]
    fn test_missing_regional_uses_fallback_phrase() {
        let mut summary = sample_summary();
        summary.predictions.regional = None;

        let outline = generate(&summary, "タイトル");
        assert_eq!(outline.sections[4].subsections[0].content, FALLBACK_REGIONAL);
    }

    #[test]
    fn test_roles_assigned_at_construction() {
        let outline = generate(&sample_summary(), "タイトル");

        // 【警告の本質】
        assert_eq!(outline.sections[2].subsections[0].roles, vec![SubsectionRole::Warning]);
        // 【データ分析】
        assert_eq!(outline.sections[3].subsections[0].roles, vec![SubsectionRole::Analysis]);
        // 【対策の方向性】 and 【具体的なアクション】
        assert_eq!(outline.sections[4].subsections[1].roles, vec![SubsectionRole::Action]);
        assert_eq!(outline.sections[8].subsections[1].roles, vec![SubsectionRole::Action]);
        // Plain narrative labels carry no role
        assert!(outline.sections[0].subsections[0].roles.is_empty());
    }

    #[test]
    fn test_roles_for_title_can_stack() {
        let roles = roles_for_title("【警告の分析と対策】");
        assert_eq!(
            roles,
            vec![
                SubsectionRole::Warning,
                SubsectionRole::Analysis,
                SubsectionRole::Action
            ]
        );
    }

    #[test]
    fn test_format_outline_numbering() {
        let formatted = format_outline(&generate(&sample_summary(), "タイトル"));
        assert!(formatted.starts_with("=== 動画アウトライン ===\n\n"));
        assert!(formatted.contains("1.『謎の予言者の出現』"));
        assert!(formatted.contains("1-1.【衝撃の第一発見】"));
        assert!(formatted.contains("9-2.【具体的なアクション】"));
    }
}
