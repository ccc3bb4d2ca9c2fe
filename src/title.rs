use rand::Rng;

use crate::config::TitleVocabulary;
use crate::summary::{Summary, UNKNOWN};

/// Maximum title length in characters, ellipsis included
const MAX_TITLE_CHARS: usize = 40;

/// Generate a clickable title from a summary
///
/// One pattern template is drawn uniformly; {emotion}, {hook} and {number}
/// are filled with independent uniform vocabulary draws; {keyword} takes the
/// first extracted keyword or a vocabulary fallback. Output never exceeds
/// 40 characters. Non-deterministic across calls unless the rng is seeded.
///
/// Total even for degenerate vocabularies: an empty pattern list degrades
/// to the bare keyword and empty slot vocabularies fill as empty strings.
pub fn generate<R: Rng + ?Sized>(summary: &Summary, vocab: &TitleVocabulary, rng: &mut R) -> String {
    let keywords = extract_keywords(summary);

    let pattern = if vocab.patterns.is_empty() {
        "{keyword}".to_string()
    } else {
        draw(&vocab.patterns, rng)
    };
    let keyword = keywords
        .first()
        .cloned()
        .unwrap_or_else(|| draw(&vocab.keywords, rng));

    let title = pattern
        .replace("{emotion}", &draw(&vocab.emotions, rng))
        .replace("{keyword}", &keyword)
        .replace("{hook}", &draw(&vocab.hooks, rng))
        .replace("{number}", &draw(&vocab.numbers, rng));

    truncate_title(&title)
}

/// Keywords worth leading a title with, in priority order
fn extract_keywords(summary: &Summary) -> Vec<String> {
    let mut keywords = Vec::new();

    if summary.subject.name != UNKNOWN {
        keywords.push(summary.subject.name.clone());
    }

    if let Some(disasters) = &summary.predictions.disasters {
        keywords.push(disasters.timing.clone());
        keywords.push(disasters.location.clone());
    }

    keywords.extend(summary.characteristics.iter().take(2).cloned());

    keywords
}

fn draw<R: Rng + ?Sized>(items: &[String], rng: &mut R) -> String {
    if items.is_empty() {
        return String::new();
    }
    items[rng.gen_range(0..items.len())].clone()
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_CHARS {
        return title.to_string();
    }
    let mut truncated: String = title.chars().take(MAX_TITLE_CHARS - 3).collect();
    truncated.push_str("...");
    truncated
}
