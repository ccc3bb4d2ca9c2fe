use crate::config::{ChannelProfile, Config, DesireGroup, TargetAudience};
use crate::dispatch::ScriptFormat;

/// Closing rationale appended by the desire pass to every document
const RATIONALE_NOTE: &str =
    "\n\n※このコンテンツは、視聴者の知的好奇心を満たすため、論理的な考察と分析に基づいて構成されています。";

/// Disclaimer appended by the audience pass
const AUDIENCE_DISCLAIMER: &str =
    "\n\n※この情報は、社会的な影響を考慮して慎重に検証されています。";

/// Run the full three-pass styling pipeline
///
/// Pass order is fixed (channel → audience → desire): later passes assume
/// the framing of earlier ones is already present. Every pass is total.
pub fn apply_all(content: String, format: ScriptFormat, config: &Config) -> String {
    let styled = apply_channel_style(content, &config.channel);
    let adapted = adapt_to_audience(styled, &config.audience);
    enrich_with_desires(adapted, format, &config.desires)
}

/// Channel-style framing pass
///
/// Prepends the themed header, labels the first content type whose name
/// appears (case-insensitively) in the body, and appends the branding
/// footer. Deliberately not idempotent: restyling already-styled content
/// wraps it again instead of deduplicating.
pub fn apply_channel_style(content: String, channel: &ChannelProfile) -> String {
    let header = format!("=== {} ===\n\n", channel.concept);
    let body_lower = content.to_lowercase();

    let matched_type = channel
        .content_types
        .iter()
        .find(|t| body_lower.contains(&t.name.to_lowercase()));

    let mut styled = match matched_type {
        Some(content_type) => format!(
            "{header}【{}】\n{}\n\n{content}",
            content_type.name, content_type.description
        ),
        None => format!("{header}{content}"),
    };

    styled.push_str(&format!("\n\n---\n{}\n", channel.branding_atmosphere));
    styled
}

/// Audience-targeting pass: age-bracket label line plus a fixed disclaimer
pub fn adapt_to_audience(content: String, audience: &TargetAudience) -> String {
    format!(
        "[視聴者層: {}向けコンテンツ]\n\n{content}{AUDIENCE_DISCLAIMER}",
        audience.age_group_main
    )
}

/// Desire-enrichment pass
///
/// The structured-prompt format gets the desires catalog prepended; every
/// format gets the closing rationale note appended unconditionally.
pub fn enrich_with_desires(
    content: String,
    format: ScriptFormat,
    desires: &[DesireGroup],
) -> String {
    let mut enriched = if format == ScriptFormat::StructuredPrompt {
        let mut block = String::from("【視聴者の期待に応える重要ポイント】\n");
        for group in desires {
            block.push_str(&format!("\n{}:\n", group.name));
            for element in &group.elements {
                block.push_str(&format!("・{element}\n"));
            }
        }
        format!("{block}\n---\n\n{content}")
    } else {
        content
    };

    enriched.push_str(RATIONALE_NOTE);
    enriched
}
