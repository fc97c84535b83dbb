//! Content shape classification.
//!
//! Inspects a text sample and yields a coarse shape category used to pick a
//! token-estimation multiplier. Checks run in priority order and the first
//! match wins: transcript-shaped text must be penalized even when it is also
//! very long.

use regex::Regex;
use std::sync::OnceLock;

/// Maximum prefix inspected for pattern checks.
const SAMPLE_PREFIX_CHARS: usize = 1000;

/// Word count above which plain prose is still considered expensive.
const VERY_LONG_WORDS: usize = 10_000;

/// Bracket characters per word above which text looks structured.
const BRACKET_DENSITY_THRESHOLD: f64 = 0.01;

/// Average word length above which text looks like URLs, code, or ids.
const LONG_WORD_THRESHOLD: f64 = 8.0;

/// Coarse shape of a text sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentShape {
    /// Plain prose.
    Natural,
    /// Timestamped or noise-annotated transcript text.
    TimestampedNoisy,
    /// Bracket-heavy or long-word text (markup, URLs, identifiers).
    StructuredOrLongWord,
    /// More than 10k words of otherwise plain prose.
    VeryLong,
}

impl ContentShape {
    /// Tokens-per-word multiplier for this shape.
    pub fn multiplier(&self) -> f64 {
        match self {
            ContentShape::Natural => 1.33,
            ContentShape::TimestampedNoisy => 6.0,
            ContentShape::StructuredOrLongWord => 3.0,
            ContentShape::VeryLong => 2.0,
        }
    }
}

impl Default for ContentShape {
    fn default() -> Self {
        ContentShape::Natural
    }
}

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // [H:MM:SS], [MM:SS], or bare H:MM timestamps
        Regex::new(r"\[\d{1,2}:\d{2}(:\d{2})?\]|\b\d{1,2}:\d{2}\b").expect("Invalid regex")
    })
}

fn noise_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Bracketed annotations auto-captioning inserts for non-speech audio
        Regex::new(r"(?i)\[(music|applause|laughter|inaudible|crosstalk|silence)\]")
            .expect("Invalid regex")
    })
}

/// Classify a text sample into a [`ContentShape`].
///
/// Pattern checks inspect at most the first 1000 characters; word counts use
/// the full text.
pub fn classify(text: &str) -> ContentShape {
    let prefix_end = text
        .char_indices()
        .nth(SAMPLE_PREFIX_CHARS)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let sample = &text[..prefix_end];

    if timestamp_regex().is_match(sample) || noise_marker_regex().is_match(sample) {
        return ContentShape::TimestampedNoisy;
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.len();

    if word_count > 0 {
        let bracket_count = sample
            .chars()
            .filter(|c| matches!(c, '[' | ']' | '{' | '}' | '(' | ')'))
            .count();
        let bracket_density = bracket_count as f64 / word_count as f64;

        let total_word_chars: usize = words.iter().map(|w| w.chars().count()).sum();
        let avg_word_len = total_word_chars as f64 / word_count as f64;

        if bracket_density > BRACKET_DENSITY_THRESHOLD || avg_word_len > LONG_WORD_THRESHOLD {
            return ContentShape::StructuredOrLongWord;
        }
    }

    if word_count > VERY_LONG_WORDS {
        return ContentShape::VeryLong;
    }

    ContentShape::Natural
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_prose() {
        assert_eq!(
            classify("The quick brown fox jumps over the lazy dog."),
            ContentShape::Natural
        );
    }

    #[test]
    fn test_noise_markers_classify_as_transcript() {
        // Scenario from auto-captioned video transcripts
        assert_eq!(
            classify("[Music] [Applause] hello there"),
            ContentShape::TimestampedNoisy
        );
        assert_eq!(classify("[Music] [Applause] hello there").multiplier(), 6.0);
    }

    #[test]
    fn test_timestamps_classify_as_transcript() {
        assert_eq!(
            classify("[0:05] welcome back [1:12:30] and that's all"),
            ContentShape::TimestampedNoisy
        );
        assert_eq!(classify("at 3:45 we discuss pricing"), ContentShape::TimestampedNoisy);
    }

    #[test]
    fn test_long_words_classify_as_structured() {
        let urls = "https://example.com/very/long/path https://example.org/another/long/path";
        assert_eq!(classify(urls), ContentShape::StructuredOrLongWord);
    }

    #[test]
    fn test_bracket_density_classifies_as_structured() {
        let json_ish = "value (one) value (two) value (three) plain words here and more plain";
        assert_eq!(classify(json_ish), ContentShape::StructuredOrLongWord);
    }

    #[test]
    fn test_very_long_prose() {
        let text = "word ".repeat(10_001);
        assert_eq!(classify(&text), ContentShape::VeryLong);
    }

    #[test]
    fn test_transcript_wins_over_very_long() {
        // Priority order: transcript shape beats length
        let mut text = "[Music] ".to_string();
        text.push_str(&"word ".repeat(10_001));
        assert_eq!(classify(&text), ContentShape::TimestampedNoisy);
    }

    #[test]
    fn test_pattern_check_only_sees_prefix() {
        // Timestamp past the first 1000 chars does not trigger the transcript shape
        let mut text = "word ".repeat(300);
        text.push_str("[1:23] late timestamp");
        assert_eq!(classify(&text), ContentShape::Natural);
    }
}
