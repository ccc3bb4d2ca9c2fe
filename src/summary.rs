use serde::{Deserialize, Serialize};

use crate::transcript::TranscriptEntry;

/// Sentinel for fields the extractor could not derive from the transcript
pub const UNKNOWN: &str = "不明";

/// Structured profile of a video's subject and claimed predictions
///
/// Derived once per request and treated as immutable by every downstream
/// generator. All fields are always populated; extraction degrades to
/// sentinel values instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub subject: SubjectProfile,
    pub predictions: Predictions,
    pub characteristics: Vec<String>,
    pub details: Vec<String>,
}

/// Profile of the prophet or information source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectProfile {
    pub name: String,
    pub origin: String,
    pub occupation: String,
    pub activities: Vec<String>,
    #[serde(rename = "traits")]
    pub traits_: Vec<String>,
    pub achievements: Vec<String>,
}

/// Claimed predictions grouped by category; absent categories degrade to
/// documented fallback phrases in the generators
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Predictions {
    pub disasters: Option<DisasterPrediction>,
    pub terrorism: Option<CategoryPrediction>,
    pub pandemic: Option<CategoryPrediction>,
    pub economic: Option<CategoryPrediction>,
    pub regional: Option<CategoryPrediction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisasterPrediction {
    pub timing: String,
    pub location: String,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPrediction {
    pub details: Vec<String>,
}

/// Derive a [`Summary`] from normalized transcript entries
///
/// Deterministic and total. The joined transcript text is threaded through
/// the extraction helpers so a future content-derived extractor only touches
/// this module; the current derivation is heuristic-light and returns a
/// fixed illustrative summary regardless of content. Downstream code must
/// not assume specific string values beyond the field shapes.
pub fn extract(entries: &[TranscriptEntry]) -> Summary {
    let full_text = entries
        .iter()
        .map(|e| e.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Summary {
        subject: extract_subject(&full_text),
        predictions: extract_predictions(&full_text),
        characteristics: extract_characteristics(&full_text),
        details: extract_details(&full_text),
    }
}

fn extract_subject(_text: &str) -> SubjectProfile {
    SubjectProfile {
        name: UNKNOWN.to_string(),
        origin: UNKNOWN.to_string(),
        occupation: "予言者".to_string(),
        activities: vec!["動画配信".to_string(), "予言活動".to_string()],
        traits_: vec![
            "霊的な啓示を受ける".to_string(),
            "未来を予知する能力".to_string(),
        ],
        achievements: vec!["過去の予言的中事例を分析".to_string()],
    }
}

fn extract_predictions(_text: &str) -> Predictions {
    Predictions {
        disasters: Some(DisasterPrediction {
            timing: "近い将来".to_string(),
            location: "複数の地域".to_string(),
            details: vec![
                "自然災害の可能性".to_string(),
                "環境変化の影響".to_string(),
            ],
        }),
        terrorism: Some(CategoryPrediction {
            details: vec![
                "社会的な混乱の可能性".to_string(),
                "セキュリティ上の課題".to_string(),
            ],
        }),
        pandemic: Some(CategoryPrediction {
            details: vec![
                "健康に関する警告".to_string(),
                "新たな健康課題の出現".to_string(),
            ],
        }),
        economic: Some(CategoryPrediction {
            details: vec![
                "経済システムの変化".to_string(),
                "社会構造の変革".to_string(),
            ],
        }),
        regional: Some(CategoryPrediction {
            details: vec![
                "日本固有の課題".to_string(),
                "社会システムの変化".to_string(),
            ],
        }),
    }
}

fn extract_characteristics(_text: &str) -> Vec<String> {
    vec![
        "具体的な時期や場所への言及".to_string(),
        "科学的な考察との組み合わせ".to_string(),
        "予防や対策の提案を含む".to_string(),
    ]
}

fn extract_details(_text: &str) -> Vec<String> {
    vec![
        "予言の背景となる歴史的文脈".to_string(),
        "現代社会との関連性".to_string(),
        "対策や準備の方法".to_string(),
    ]
}

/// Render a summary as the numbered four-part text document
pub fn format_summary(summary: &Summary) -> String {
    let mut out = String::from("予言・都市伝説まとめ\n\n");

    out.push_str("1. 予言者・情報源のプロフィールと特徴\n");
    out.push_str(&format!("・名前：{}\n", summary.subject.name));
    out.push_str(&format!("・出身：{}\n", summary.subject.origin));
    out.push_str(&format!("・職業・肩書：{}\n", summary.subject.occupation));
    out.push_str(&format!("・活動：{}\n", summary.subject.activities.join("、")));
    out.push_str(&format!("・特徴：{}\n", summary.subject.traits_.join("、")));
    out.push_str(&format!(
        "・実績：{}\n\n",
        summary.subject.achievements.join("、")
    ));

    out.push_str("2. 主要な予言・都市伝説\n");
    if let Some(disasters) = &summary.predictions.disasters {
        out.push_str("1) 大規模災害\n");
        out.push_str(&format!("・時期：{}\n", disasters.timing));
        out.push_str(&format!("・場所：{}\n", disasters.location));
        out.push_str("・内容：\n");
        for detail in &disasters.details {
            out.push_str(&format!("  ・{detail}\n"));
        }
    }

    out.push_str("\n3. 予言・都市伝説の特徴\n");
    for characteristic in &summary.characteristics {
        out.push_str(&format!("・{characteristic}\n"));
    }

    out.push_str("\n4. 詳細の解説\n");
    for detail in &summary.details {
        out.push_str(&format!("・{detail}\n"));
    }

    out
}
