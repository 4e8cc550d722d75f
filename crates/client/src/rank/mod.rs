//! Lexical scoring, ranking, and snippet extraction over spec chunks.
//!
//! Term-frequency scoring with a length dampener; not TF-IDF, there is no
//! corpus-level document-frequency term. The divisor, section bonus, and
//! snippet radius are tuning constants grouped in [`RankConfig`].

use regex::Regex;

use crate::index::Chunk;

/// Maximum number of chunks a ranking returns.
pub const MAX_MATCHES: usize = 5;

/// Maximum characters in a result snippet.
pub const MAX_SNIPPET_CHARS: usize = 480;

/// Tuning constants for scoring and snippet extraction.
#[derive(Debug, Clone)]
pub struct RankConfig {
    /// Length normalization: raw term frequency is divided by
    /// `1 + text_len / length_divisor`.
    pub length_divisor: f64,

    /// Additive bonus when the caller's section hint is a substring of a
    /// chunk's section id.
    pub section_bonus: f64,

    /// Characters of context kept on each side of the first query match.
    pub snippet_radius: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self { length_divisor: 2000.0, section_bonus: 2.0, snippet_radius: 220 }
    }
}

/// Distinct, lowercased word tokens of a query, in first-seen order.
fn tokenize(query: &str) -> Vec<String> {
    let splitter = Regex::new(r"\W+").expect("invalid regex");

    let mut tokens: Vec<String> = Vec::new();
    for raw in splitter.split(query) {
        if raw.is_empty() {
            continue;
        }
        let token = raw.to_ascii_lowercase();
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

fn score_tokens(tokens: &[String], text: &str, config: &RankConfig) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }

    let haystack = text.to_ascii_lowercase();
    let occurrences: usize = tokens
        .iter()
        .map(|token| haystack.matches(token.as_str()).count())
        .sum();

    occurrences as f64 / (1.0 + haystack.chars().count() as f64 / config.length_divisor)
}

/// Score a text against a query: summed distinct-token occurrence counts,
/// dampened by text length.
pub fn score(query: &str, text: &str, config: &RankConfig) -> f64 {
    score_tokens(&tokenize(query), text, config)
}

/// Order chunks by relevance, best first, returning at most [`MAX_MATCHES`].
///
/// A section hint adds a fixed bonus to every chunk whose section id contains
/// it. The sort is stable, so ties keep document order.
pub fn rank<'a>(
    query: &str, section_hint: Option<&str>, chunks: &'a [Chunk], config: &RankConfig,
) -> Vec<&'a Chunk> {
    let tokens = tokenize(query);

    let mut scored: Vec<(f64, &Chunk)> = chunks
        .iter()
        .map(|chunk| {
            let mut score = score_tokens(&tokens, &chunk.text, config);
            if let Some(hint) = section_hint
                && !hint.is_empty()
                && chunk.section.contains(hint)
            {
                score += config.section_bonus;
            }
            (score, chunk)
        })
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(MAX_MATCHES).map(|(_, chunk)| chunk).collect()
}

/// Extract a preview window around the earliest query-token match.
///
/// Falls back to the head of the text when no token occurs. The result is
/// trimmed and never exceeds [`MAX_SNIPPET_CHARS`].
pub fn snippet(text: &str, query: &str, config: &RankConfig) -> String {
    let haystack = text.to_ascii_lowercase();
    let hit = tokenize(query)
        .iter()
        .filter_map(|token| haystack.find(token.as_str()))
        .min();

    let Some(idx) = hit else {
        return truncate_chars(text, MAX_SNIPPET_CHARS);
    };

    let start = next_char_boundary(text, idx.saturating_sub(config.snippet_radius));
    let end = next_char_boundary(text, (idx + config.snippet_radius).min(text.len()));

    truncate_chars(text[start..end].trim(), MAX_SNIPPET_CHARS)
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn next_char_boundary(s: &str, mut index: usize) -> usize {
    while index < s.len() && !s.is_char_boundary(index) {
        index += 1;
    }
    index.min(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(section: &str, title: &str, text: &str) -> Chunk {
        Chunk {
            section: section.to_string(),
            title: title.to_string(),
            text: text.to_string(),
            permalink: format!("https://c2pa.org/spec.html#{section}"),
        }
    }

    #[test]
    fn test_score_empty_query() {
        let config = RankConfig::default();
        assert_eq!(score("", "a manifest is a set of claims", &config), 0.0);
        assert_eq!(score("  ,;  ", "a manifest", &config), 0.0);
    }

    #[test]
    fn test_score_empty_text() {
        let config = RankConfig::default();
        assert_eq!(score("manifest", "", &config), 0.0);
    }

    #[test]
    fn test_score_counts_occurrences() {
        let config = RankConfig::default();
        let once = score("manifest", "the manifest format", &config);
        let twice = score("manifest", "the manifest holds a manifest id", &config);
        assert!(twice > once);
        assert!(once > 0.0);
    }

    #[test]
    fn test_score_case_insensitive() {
        let config = RankConfig::default();
        assert!(score("MANIFEST", "The Manifest store", &config) > 0.0);
    }

    #[test]
    fn test_score_deduplicates_query_tokens() {
        let config = RankConfig::default();
        let text = "assertions bind metadata";
        assert_eq!(score("metadata metadata", text, &config), score("metadata", text, &config));
    }

    #[test]
    fn test_length_normalization_dampens_long_text() {
        let config = RankConfig::default();
        let short = "the manifest format";
        let long = format!("{} {}", "padding words repeated here ".repeat(300), "manifest");

        assert!(score("manifest", short, &config) > score("manifest", &long, &config));
    }

    #[test]
    fn test_rank_caps_results() {
        let config = RankConfig::default();
        let chunks: Vec<Chunk> = (0..10)
            .map(|i| chunk(&format!("{i}"), "t", "manifest text"))
            .collect();

        let ranked = rank("manifest", None, &chunks, &config);
        assert_eq!(ranked.len(), MAX_MATCHES);
    }

    #[test]
    fn test_rank_orders_by_score() {
        let config = RankConfig::default();
        let chunks = vec![
            chunk("1", "1 Scope", "nothing relevant here"),
            chunk("3.4", "3.4 Assertions", "a manifest assertion binds assertion metadata"),
            chunk("2", "2 Terms", "one manifest mention"),
        ];

        let ranked = rank("manifest assertion", None, &chunks, &config);
        assert_eq!(ranked[0].section, "3.4");
        assert_eq!(ranked[1].section, "2");
        assert_eq!(ranked[2].section, "1");
    }

    #[test]
    fn test_rank_section_hint_bonus() {
        let config = RankConfig::default();
        let chunks = vec![
            chunk("2.1", "2.1 Terms", "manifest manifest manifest"),
            chunk("3.4", "3.4 Assertions", "manifest"),
        ];

        let without = rank("manifest", None, &chunks, &config);
        assert_eq!(without[0].section, "2.1");

        let with = rank("manifest", Some("3.4"), &chunks, &config);
        assert_eq!(with[0].section, "3.4");
    }

    #[test]
    fn test_rank_empty_hint_adds_no_bonus() {
        let config = RankConfig::default();
        let chunks = vec![
            chunk("2.1", "2.1 Terms", "manifest manifest"),
            chunk("3.4", "3.4 Assertions", "manifest"),
        ];

        let ranked = rank("manifest", Some(""), &chunks, &config);
        assert_eq!(ranked[0].section, "2.1");
    }

    #[test]
    fn test_rank_is_deterministic_on_ties() {
        let config = RankConfig::default();
        let chunks = vec![
            chunk("1", "1 A", "manifest"),
            chunk("2", "2 B", "manifest"),
            chunk("3", "3 C", "manifest"),
        ];

        let ranked = rank("manifest", None, &chunks, &config);
        let sections: Vec<&str> = ranked.iter().map(|c| c.section.as_str()).collect();
        assert_eq!(sections, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_snippet_contains_match() {
        let config = RankConfig::default();
        let result = snippet("abc manifest def", "manifest", &config);
        assert!(result.contains("manifest"));
        assert!(result.chars().count() <= MAX_SNIPPET_CHARS);
    }

    #[test]
    fn test_snippet_window_is_bounded() {
        let config = RankConfig::default();
        let text = format!("{}manifest{}", "a".repeat(1000), "b".repeat(1000));
        let result = snippet(&text, "manifest", &config);

        assert!(result.contains("manifest"));
        assert!(result.chars().count() <= 2 * config.snippet_radius);
    }

    #[test]
    fn test_snippet_no_match_returns_prefix() {
        let config = RankConfig::default();
        let text = "x".repeat(1000);
        let result = snippet(&text, "manifest", &config);
        assert_eq!(result, "x".repeat(MAX_SNIPPET_CHARS));
    }

    #[test]
    fn test_snippet_short_text_no_match() {
        let config = RankConfig::default();
        assert_eq!(snippet("short text", "manifest", &config), "short text");
    }

    #[test]
    fn test_snippet_uses_earliest_match() {
        let config = RankConfig { snippet_radius: 10, ..Default::default() };
        let text = format!("claim {}assertion", "z".repeat(100));
        let result = snippet(&text, "assertion claim", &config);
        assert!(result.contains("claim"));
        assert!(!result.contains("assertion"));
    }

    #[test]
    fn test_end_to_end_ranking_with_snippets() {
        let config = RankConfig::default();
        let chunks = vec![
            chunk("1.2", "1.2 Scope", "this spec covers provenance for media files"),
            chunk(
                "3.4",
                "3.4 Assertions",
                "each manifest assertion is hashed; the manifest references every assertion",
            ),
        ];

        let ranked = rank("manifest assertion", None, &chunks, &config);
        assert_eq!(ranked[0].section, "3.4");

        let preview = snippet(&ranked[0].text, "manifest assertion", &config);
        assert!(preview.contains("manifest"));
        assert!(preview.chars().count() <= MAX_SNIPPET_CHARS);
    }
}
