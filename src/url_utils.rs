//! URL Utility Functions
//!
//! Lenient URL parsing and query-string helpers shared by the platform
//! classifier and canonicalizer, plus caller-facing job URL validation.

use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// Hosts of well-known job boards, used only for diagnostics.
const KNOWN_JOB_BOARDS: &[&str] = &[
    "linkedin.com", "indeed.com", "glassdoor.com", "monster.com", "ziprecruiter.com",
    "dice.com", "careerbuilder.com", "lever.co", "greenhouse.io", "workday.com",
    "myworkdayjobs.com", "smartrecruiters.com", "angel.co", "wellfound.com",
    "simplyhired.com", "hired.com", "builtin.com", "theladders.com", "flexjobs.com",
];

/// Parse a URL, tolerating a missing scheme.
///
/// Returns `None` for anything that still does not parse into a URL with a
/// host; callers treat that as "no structural information available".
#[must_use]
pub fn parse_lenient(raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let parsed = if raw.contains("://") {
        Url::parse(raw)
    } else {
        Url::parse(&format!("https://{raw}"))
    };

    parsed.ok().filter(|url| url.host_str().is_some())
}

/// Lower-cased host of a parsed URL, or an empty string.
#[must_use]
pub fn host(url: &Url) -> String {
    url.host_str().map(str::to_ascii_lowercase).unwrap_or_default()
}

/// Whether the query string carries `key` (compared case-insensitively).
#[must_use]
pub fn has_query_key(url: &Url, key: &str) -> bool {
    url.query_pairs().any(|(k, _)| k.eq_ignore_ascii_case(key))
}

/// First non-blank value of `key` in the query string.
///
/// Blank values are skipped the same way form decoders drop them.
#[must_use]
pub fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .filter(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.trim().to_string())
        .find(|v| !v.is_empty())
}

/// Validate user input as a job posting URL and normalize its scheme.
///
/// Empty input and input without a dot are rejected. A missing scheme is
/// replaced by `https://`. Unknown hosts are accepted; the generic path
/// handles them.
pub fn validate_job_url(input: &str) -> Result<String> {
    let input = input.trim();

    if input.is_empty() {
        return Err(Error::InvalidUrl("URL cannot be empty".to_string()));
    }
    if !input.contains('.') {
        return Err(Error::InvalidUrl(format!("{input}: invalid URL format")));
    }

    let normalized = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{input}")
    };

    let lower = normalized.to_ascii_lowercase();
    if KNOWN_JOB_BOARDS.iter().any(|board| lower.contains(board)) {
        debug!(url = %normalized, "recognized known job board");
    } else {
        debug!(url = %normalized, "unknown job site, extraction will be attempted");
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_adds_scheme() {
        let url = parse_lenient("apply.company.com?gh_jid=123");
        assert_eq!(url.as_ref().map(host), Some("apply.company.com".to_string()));
    }

    #[test]
    fn test_parse_lenient_rejects_garbage() {
        assert!(parse_lenient("").is_none());
        assert!(parse_lenient("   ").is_none());
        assert!(parse_lenient("http://").is_none());
        assert!(parse_lenient("ht!tp://[broken").is_none());
    }

    #[test]
    fn test_query_value_skips_blank_values() {
        let url = parse_lenient("https://x.com/?gh_jid=&gh_jid=42").expect("valid url");
        assert_eq!(query_value(&url, "gh_jid"), Some("42".to_string()));
        assert!(has_query_key(&url, "GH_JID"));
        assert_eq!(query_value(&url, "for"), None);
    }

    #[test]
    fn test_query_value_decodes_percent_encoding() {
        let url = parse_lenient("https://x.com/?gh%5Fjid=77").expect("valid url");
        assert_eq!(query_value(&url, "gh_jid"), Some("77".to_string()));
    }

    #[test]
    fn test_validate_job_url() {
        assert_eq!(
            validate_job_url("  jobs.lever.co/acme/123 ").ok(),
            Some("https://jobs.lever.co/acme/123".to_string())
        );
        assert_eq!(
            validate_job_url("http://careers.acme.com").ok(),
            Some("http://careers.acme.com".to_string())
        );
        assert!(matches!(validate_job_url(""), Err(Error::InvalidUrl(_))));
        assert!(matches!(validate_job_url("localhost"), Err(Error::InvalidUrl(_))));
    }
}
