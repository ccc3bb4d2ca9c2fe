use rand::Rng;

use crate::summary::Summary;

/// Slots of an opening narration, assembled in fixed order
#[derive(Debug, Clone)]
struct OpeningSlots {
    hook: String,
    tension: String,
    evidence: String,
    urgency: String,
    engagement: String,
}

/// Generate the opening narration document
///
/// Five fixed rhetorical slots: hook (one of three lines, drawn per call),
/// tension, evidence, urgency, engagement. Pure function of the summary
/// apart from the hook draw; assembly order never changes.
pub fn generate_opening<R: Rng + ?Sized>(summary: &Summary, rng: &mut R) -> String {
    let slots = OpeningSlots {
        hook: opening_hook(summary, rng),
        tension: opening_tension(summary),
        evidence: opening_evidence(summary),
        urgency: opening_urgency(summary),
        engagement: opening_engagement(),
    };

    format!(
        "=== オープニングナレーション ===\n\n{}\n\n{}\n\n{}\n\n{}\n\n{}",
        slots.hook, slots.tension, slots.evidence, slots.urgency, slots.engagement
    )
}

fn opening_hook<R: Rng + ?Sized>(summary: &Summary, rng: &mut R) -> String {
    let hooks = [
        format!(
            "あなたの人生が、たった一人の{}の予言で大きく変わろうとしています。",
            summary.subject.occupation
        ),
        "今夜、あなたが眠っている間に、世界は大きく変わるかもしれません。".to_string(),
        "この動画を最後まで見ないと、あなたとあなたの大切な人が後悔することになるかもしれません。"
            .to_string(),
    ];
    hooks[rng.gen_range(0..hooks.len())].clone()
}

fn opening_tension(summary: &Summary) -> String {
    match &summary.predictions.disasters {
        Some(disasters) => format!(
            "{}に{}で起こる出来事は、私たちの生活を根底から覆すことになります。",
            disasters.timing, disasters.location
        ),
        None => "迫り来る危機は、私たちの想像をはるかに超えています。".to_string(),
    }
}

fn opening_evidence(summary: &Summary) -> String {
    format!(
        "{}。その的中率は、世界中の専門家たちを震撼させています。",
        summary.subject.achievements.join("、")
    )
}

fn opening_urgency(summary: &Summary) -> String {
    let timing = summary
        .predictions
        .disasters
        .as_ref()
        .map(|d| d.timing.as_str())
        .unwrap_or("近い将来");
    format!(
        "生き残るために必要な情報を、この動画ですべて明かします。\
         {timing}に起こる出来事に、今すぐ備えなければなりません。"
    )
}

fn opening_engagement() -> String {
    "\n\nみなさん、この予言をどう思いますか？\n\
     コメント欄で、あなたの考えを教えてください。\n\
     動画の最後には、具体的な対策もお伝えします。\n\
     チャンネル登録、高評価もお願いします。\n\
     一緒に真実を見届けましょう。"
        .to_string()
}

/// Slots of an ending narration, assembled in fixed order
#[derive(Debug, Clone)]
struct EndingSlots {
    summary: String,
    timeframe: String,
    next_episode: String,
    engagement: String,
    hope: String,
}

/// Generate the ending narration document
///
/// Five fixed slots: summary, timeframe, next-episode teaser, engagement,
/// hope. Pure function of the summary; assembly order never changes.
pub fn generate_ending(summary: &Summary) -> String {
    let slots = EndingSlots {
        summary: ending_summary(summary),
        timeframe: ending_timeframe(summary),
        next_episode: ending_next_episode(summary),
        engagement: ending_engagement(summary),
        hope: ending_hope(),
    };

    format!(
        "=== エンディングナレーション ===\n\n{}\n\n{}\n\n{}\n\n{}\n\n{}",
        slots.summary, slots.timeframe, slots.next_episode, slots.engagement, slots.hope
    )
}

fn ending_summary(summary: &Summary) -> String {
    format!(
        "{}が示した未来。\nその全ては、私たちの行動次第で変えられる可能性を秘めています。",
        summary.subject.name
    )
}

fn ending_timeframe(summary: &Summary) -> String {
    match &summary.predictions.disasters {
        Some(disasters) => format!(
            "しかし、時間は限られています。\n{}まで、あとわずか。",
            disasters.timing
        ),
        None => "時間は刻一刻と過ぎていきます。\n今すぐ行動を起こさなければなりません。"
            .to_string(),
    }
}

fn ending_next_episode(summary: &Summary) -> String {
    let regional_teaser = summary
        .predictions
        .regional
        .as_ref()
        .and_then(|r| r.details.first())
        .map(String::as_str)
        .unwrap_or("日本への影響");
    format!(
        "次回、{}の新たな予言と、\n\
         私たちに残された具体的な対策について詳しくお伝えします。\n\
         特に{}について、\n\
         重要な情報を公開する予定です。",
        summary.subject.name, regional_teaser
    )
}

fn ending_engagement(summary: &Summary) -> String {
    let highlight = summary
        .predictions
        .disasters
        .as_ref()
        .and_then(|d| d.details.first())
        .map(String::as_str)
        .unwrap_or("予言");
    format!(
        "\nあなたは、これらの予言をどう受け止めましたか？\n\
         特に印象に残った予測は？\n\
         {highlight}への対策として、\n\
         あなたならどのような行動を取りますか？\n\n\
         コメント欄で、みなさんの意見をシェアしてください。\n\
         興味深い考察には、詳しい追加情報とともに返信させていただきます。\n\
         チャンネル登録、高評価もお願いします。\n\
         この重要な情報を、より多くの人に届けるために。"
    )
}

fn ending_hope() -> String {
    "\n私たちには、まだ希望があります。\n\
     最新の予言と対策情報は、このチャンネルで随時更新していきます。\n\
     次回の配信でお会いしましょう。"
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary;
    use crate::transcript::TranscriptEntry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_summary() -> Summary {
        summary::extract(&[TranscriptEntry {
            text: "予言".to_string(),
            start_offset_ms: 0,
            duration_ms: 1000,
        }])
    }

    #[test]
    fn test_opening_slot_order() {
        let summary = sample_summary();
        let opening = generate_opening(&summary, &mut StdRng::seed_from_u64(1));

        assert!(opening.starts_with("=== オープニングナレーション ===\n\n"));
        let disasters = summary.predictions.disasters.as_ref().unwrap();
        let tension_pos = opening.find(&disasters.timing).unwrap();
        let evidence_pos = opening.find("震撼させています").unwrap();
        let urgency_pos = opening.find("生き残るために必要な情報").unwrap();
        let engagement_pos = opening.find("チャンネル登録").unwrap();
        assert!(tension_pos < evidence_pos);
        assert!(evidence_pos < urgency_pos);
        assert!(urgency_pos < engagement_pos);
    }

    #[test]
    fn test_opening_hook_is_one_of_three() {
        let summary = sample_summary();
        let mut seen = std::collections::HashSet::new();

        for seed in 0..50 {
            let opening = generate_opening(&summary, &mut StdRng::seed_from_u64(seed));
            let hook_line = opening
                .lines()
                .nth(2)
                .expect("hook follows the header")
                .to_string();
            seen.insert(hook_line);
        }

        assert!(seen.len() <= 3);
        assert!(seen.iter().all(|h| h.contains("あなた") || h.contains("今夜")));
    }

    #[test]
    fn test_opening_without_disasters_uses_fallbacks() {
        let mut summary = sample_summary();
        summary.predictions.disasters = None;
        let opening = generate_opening(&summary, &mut StdRng::seed_from_u64(1));

        assert!(opening.contains("迫り来る危機は、私たちの想像をはるかに超えています。"));
        assert!(opening.contains("近い将来に起こる出来事に"));
    }

    #[test]
    fn test_ending_slot_order() {
        let summary = sample_summary();
        let ending = generate_ending(&summary);

        assert!(ending.starts_with("=== エンディングナレーション ===\n\n"));
        let summary_pos = ending.find("が示した未来").unwrap();
        let timeframe_pos = ending.find("まで、あとわずか").unwrap();
        let next_pos = ending.find("次回、").unwrap();
        let hope_pos = ending.find("まだ希望があります").unwrap();
        assert!(summary_pos < timeframe_pos);
        assert!(timeframe_pos < next_pos);
        assert!(next_pos < hope_pos);
    }

    #[test]
    fn test_ending_is_deterministic() {
        let summary = sample_summary();
        assert_eq!(generate_ending(&summary), generate_ending(&summary));
    }

    #[test]
    fn test_ending_fallbacks_without_predictions() {
        let mut summary = sample_summary();
        summary.predictions = Default::default();
        let ending = generate_ending(&summary);

        assert!(ending.contains("時間は刻一刻と過ぎていきます。"));
        assert!(ending.contains("特に日本への影響について、"));
        assert!(ending.contains("予言への対策として、"));
    }
}
