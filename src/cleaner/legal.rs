//! Line-level suppression of legal and consent boilerplate.
//!
//! A line matching any legal rule is dropped. A short matching line is taken
//! as the header of a legal section, and everything after it is dropped until
//! a line that looks like the start of a new section.

use tracing::trace;

use crate::options::Options;
use crate::patterns::LEGAL_LINE_RULES;

/// Name of the first legal rule matching `line`, in rule order.
#[must_use]
pub fn matching_rule(line: &str) -> Option<&'static str> {
    LEGAL_LINE_RULES
        .iter()
        .find(|(_, re)| re.is_match(line))
        .map(|(name, _)| *name)
}

/// Whether a line reads like a section heading that ends suppression.
fn starts_section(line: &str, options: &Options) -> bool {
    line.chars().count() < options.section_resume_max_len
        && (!options.section_resume_requires_colon || line.ends_with(':'))
}

/// Remove legal lines and the sections they head.
///
/// Thresholds come from `options`: `legal_header_max_len` decides which
/// legal lines open a suppressed section, `section_resume_max_len` and
/// `section_resume_requires_colon` decide which line closes it. Blank lines
/// are kept, but never two in a row.
#[must_use]
pub fn suppress_legal_sections(text: &str, options: &Options) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut skipping = false;

    for raw in text.lines() {
        let line = raw.trim();

        if line.is_empty() {
            if kept.last().is_some_and(|last| !last.is_empty()) {
                kept.push("");
            }
            continue;
        }

        if let Some(rule) = matching_rule(line) {
            trace!(rule, line, "dropping legal line");
            if line.chars().count() < options.legal_header_max_len {
                skipping = true;
            }
            continue;
        }

        if skipping {
            if starts_section(line, options) {
                skipping = false;
            } else {
                continue;
            }
        }

        kept.push(line);
    }

    kept.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_single_legal_line() {
        let text = "About the role\nWe are an equal opportunity employer and value diversity at every level of our company, across all teams and offices.\nBuild things";
        assert_eq!(suppress_legal_sections(text, &Options::default()), "About the role\nBuild things");
    }

    #[test]
    fn test_short_header_suppresses_section() {
        let text = "Requirements:\n5 years of Rust\nEqual Opportunity Employer\nWe do not discriminate.\nAll applicants welcome.\nBenefits:\nHealth insurance";
        assert_eq!(
            suppress_legal_sections(text, &Options::default()),
            "Requirements:\n5 years of Rust\nBenefits:\nHealth insurance"
        );
    }

    #[test]
    fn test_section_without_colon_stays_suppressed() {
        let text = "Privacy Policy\nShort line\nMore legal text";
        assert_eq!(suppress_legal_sections(text, &Options::default()), "");
    }

    #[test]
    fn test_colon_requirement_is_configurable() {
        let options = Options {
            section_resume_requires_colon: false,
            ..Options::default()
        };
        let text = "Privacy Policy\nPerks\nRemote work";
        assert_eq!(suppress_legal_sections(text, &options), "Perks\nRemote work");
    }

    #[test]
    fn test_blank_lines_collapse() {
        let text = "One\n\n\n\nTwo\n\n";
        assert_eq!(suppress_legal_sections(text, &Options::default()), "One\n\nTwo\n");
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(matching_rule("© 2024 Acme. All rights reserved."), Some("copyright"));
        assert_eq!(matching_rule("By clicking apply you agree"), Some("consent"));
        assert_eq!(matching_rule("Senior Rust Engineer"), None);
    }
}
