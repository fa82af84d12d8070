//! Final whitespace and noise normalization of cleaned text.

use crate::patterns::{HORIZONTAL_WHITESPACE, LINE_WHITESPACE, MULTIPLE_NEWLINES, PUNCTUATION_LINE};

/// Lines shorter than this (in characters) are noise.
const MIN_LINE_CHARS: usize = 3;

/// Normalize extracted text for downstream use.
///
/// Collapses runs of blank lines to one, drops separator lines made only of
/// punctuation and lines shorter than three characters, collapses horizontal
/// whitespace, and trims the whole text.
#[must_use]
pub fn final_cleanup(text: &str) -> String {
    let text = MULTIPLE_NEWLINES.replace_all(text, "\n\n");

    let lines: Vec<String> = text
        .lines()
        .filter_map(|line| {
            if line.trim().is_empty() {
                return Some(String::new());
            }
            if PUNCTUATION_LINE.is_match(line) || line.trim().chars().count() < MIN_LINE_CHARS {
                return None;
            }
            Some(HORIZONTAL_WHITESPACE.replace_all(line, " ").into_owned())
        })
        .collect();

    let joined = lines.join("\n");
    let joined = LINE_WHITESPACE.replace_all(&joined, "");
    MULTIPLE_NEWLINES.replace_all(&joined, "\n\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_blank_runs() {
        assert_eq!(final_cleanup("Alpha\n\n\n\n\nBeta"), "Alpha\n\nBeta");
    }

    #[test]
    fn test_drops_noise_lines() {
        let text = "Title\n---\n•\nok\nReal content here\n| |";
        assert_eq!(final_cleanup(text), "Title\nReal content here");
    }

    #[test]
    fn test_blank_runs_left_by_dropped_lines() {
        assert_eq!(final_cleanup("Alpha\n\n***\n\nBeta"), "Alpha\n\nBeta");
    }

    #[test]
    fn test_collapses_horizontal_whitespace() {
        assert_eq!(final_cleanup("  Senior \t  Engineer\u{a0}\u{a0}Role  "), "Senior Engineer Role");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(final_cleanup(""), "");
        assert_eq!(final_cleanup(" \n \n "), "");
    }
}
