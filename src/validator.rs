//! Content Validation
//!
//! Decides whether extracted text is an actual job description: long enough,
//! and using at least a couple of distinct terms from job-posting vocabulary.

use serde::Serialize;
use tracing::debug;

use crate::options::Options;

/// Job-posting vocabulary, matched case-insensitively as substrings.
pub const JOB_VOCABULARY: &[&str] = &[
    "responsibilities",
    "qualifications",
    "requirements",
    "experience",
    "skills",
    "benefits",
    "salary",
    "location",
    "apply",
    "position",
    "role",
    "team",
    "opportunity",
    "job description",
    "about the role",
    "what you'll do",
    "what we're looking for",
    "who you are",
    "about you",
];

/// Outcome of validating a text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Assessment {
    /// Length of the text in characters.
    pub chars: usize,
    /// Vocabulary terms found, in vocabulary order.
    pub matched_terms: Vec<&'static str>,
    /// Whether the text passed both the length and the vocabulary test.
    pub meaningful: bool,
}

/// Whether `text` looks like job content, with the default keyword threshold.
///
/// # Example
///
/// ```rust
/// use job_extract::is_meaningful;
///
/// assert!(!is_meaningful("", 200));
/// assert!(!is_meaningful("Responsibilities and requirements", 200));
/// ```
#[must_use]
pub fn is_meaningful(text: &str, min_length: usize) -> bool {
    let options = Options {
        min_length,
        ..Options::default()
    };
    assess(text, &options).meaningful
}

/// Validate `text` against the thresholds in `options`.
///
/// Text shorter than `min_length` characters fails without a vocabulary
/// scan. Typographic apostrophes count as plain ones, so "what you’ll do"
/// matches "what you'll do".
#[must_use]
pub fn assess(text: &str, options: &Options) -> Assessment {
    let chars = text.chars().count();
    if chars < options.min_length || text.trim().is_empty() {
        debug!(chars, min_length = options.min_length, "text too short");
        return Assessment {
            chars,
            ..Assessment::default()
        };
    }

    let lower = text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'");
    let matched_terms: Vec<&'static str> = JOB_VOCABULARY
        .iter()
        .copied()
        .filter(|term| lower.contains(term))
        .collect();
    let meaningful = matched_terms.len() >= options.min_keyword_matches;

    debug!(chars, matched = matched_terms.len(), meaningful, "assessed text");
    Assessment {
        chars,
        matched_terms,
        meaningful,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(core: &str, len: usize) -> String {
        let mut text = core.to_string();
        while text.chars().count() < len {
            text.push_str(" lorem ipsum");
        }
        text
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(!is_meaningful("", 200));
        assert!(!is_meaningful("   ", 200));
        assert!(!is_meaningful("   ", 0));
    }

    #[test]
    fn test_long_text_with_two_terms() {
        let text = padded("Responsibilities: build things. Requirements: Rust.", 500);
        assert!(is_meaningful(&text, 200));
    }

    #[test]
    fn test_long_text_with_one_term() {
        let text = padded("Salary negotiable.", 500);
        assert!(!is_meaningful(&text, 200));
    }

    #[test]
    fn test_length_boundary() {
        let text = padded("skills benefits", 200);
        let exact: String = text.chars().take(200).collect();
        assert!(is_meaningful(&exact, 200));

        let short: String = text.chars().take(199).collect();
        assert!(!is_meaningful(&short, 200));
    }

    #[test]
    fn test_length_counts_characters() {
        let text = format!("skills benefits {}", "é".repeat(190));
        assert_eq!(text.chars().count(), 206);
        assert!(is_meaningful(&text, 200));
    }

    #[test]
    fn test_assess_reports_terms() {
        let text = padded("What you\u{2019}ll do: join the TEAM.", 300);
        let result = assess(&text, &Options::default());
        assert_eq!(result.matched_terms, vec!["team", "what you'll do"]);
        assert!(result.meaningful);
        assert_eq!(result.chars, text.chars().count());
    }

    #[test]
    fn test_keyword_threshold_is_configurable() {
        let text = padded("Experience with skills and benefits", 300);
        let strict = Options {
            min_keyword_matches: 4,
            ..Options::default()
        };
        assert!(!assess(&text, &strict).meaningful);
        assert!(assess(&text, &Options::default()).meaningful);
    }
}
