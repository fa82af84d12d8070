//! URL Canonicalization
//!
//! Rewrites embedded or proxied job URLs into the form the platform itself
//! serves. The canonical page usually carries cleaner markup and structured
//! data than the employer's wrapper page.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::PlatformTag;
use crate::patterns::{
    GREENHOUSE_BOARD_TOKEN, GREENHOUSE_EMBED_TOKEN, JOB_ID_PATH, LEVER_APPLY_SUFFIX,
    LEVER_COMPANY, LEVER_POSTING_ID,
};
use crate::url_utils;

const GREENHOUSE_BOARD_HOST: &str = "boards.greenhouse.io";
const LEVER_HOST: &str = "lever.co";
const LEVER_API_BASE: &str = "https://api.lever.co/v0/postings";

/// A job URL together with its canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedUrl {
    /// URL as supplied by the caller.
    pub original: String,
    /// URL the page should be fetched from.
    pub canonical: String,
    /// Whether `canonical` differs from `original`.
    pub was_rewritten: bool,
}

impl ResolvedUrl {
    fn unchanged(url: &str) -> Self {
        Self {
            original: url.to_string(),
            canonical: url.to_string(),
            was_rewritten: false,
        }
    }

    fn rewritten(url: &str, canonical: String) -> Self {
        let was_rewritten = canonical != url;
        Self {
            original: url.to_string(),
            canonical,
            was_rewritten,
        }
    }
}

/// Resolve the canonical URL of a job page for the given platform.
///
/// Workday and generic URLs are returned unchanged. Unparsable URLs are
/// returned unchanged as well.
///
/// # Example
///
/// ```rust
/// use job_extract::{canonicalize, PlatformTag};
///
/// let resolved = canonicalize("https://careers.acme.com/jobs?gh_jid=12345", PlatformTag::Greenhouse);
/// assert!(resolved.was_rewritten);
/// assert_eq!(resolved.canonical, "https://boards.greenhouse.io/embed/job_app?token=12345");
/// ```
#[must_use]
pub fn canonicalize(url: &str, platform: PlatformTag) -> ResolvedUrl {
    let resolved = match platform {
        PlatformTag::Greenhouse => greenhouse(url),
        PlatformTag::Lever => lever(url),
        PlatformTag::Workday | PlatformTag::Generic => ResolvedUrl::unchanged(url),
    };

    if resolved.was_rewritten {
        debug!(
            original = %resolved.original,
            canonical = %resolved.canonical,
            platform = platform.as_str(),
            "rewrote job url"
        );
    }
    resolved
}

/// Lever's public postings API endpoint for a Lever job URL.
///
/// Returns `None` for other platforms and for Lever URLs without a posting
/// UUID at the end of the path.
#[must_use]
pub fn api_endpoint(url: &str, platform: PlatformTag) -> Option<String> {
    if platform != PlatformTag::Lever {
        return None;
    }

    let canonical = lever(url).canonical;
    let path_end = canonical.split(['?', '#']).next().unwrap_or_default();
    let posting = LEVER_POSTING_ID.captures(path_end)?.get(1)?.as_str().to_string();
    let company = LEVER_COMPANY.captures(&canonical)?.get(1)?.as_str().to_string();

    Some(format!("{LEVER_API_BASE}/{company}/{posting}"))
}

// =============================================================================
// Greenhouse
// =============================================================================

fn greenhouse(url: &str) -> ResolvedUrl {
    let Some(parsed) = url_utils::parse_lenient(url) else {
        return ResolvedUrl::unchanged(url);
    };

    if url_utils::host(&parsed).contains(GREENHOUSE_BOARD_HOST) {
        return ResolvedUrl::unchanged(url);
    }

    if let Some(job_id) = url_utils::query_value(&parsed, "gh_jid") {
        let canonical = match greenhouse_token(url, &parsed) {
            Some(token) => board_url(&token, &job_id),
            None => embed_url(&job_id),
        };
        return ResolvedUrl::rewritten(url, canonical);
    }

    if url.to_lowercase().contains("greenhouse") {
        if let Some(token) = url_utils::query_value(&parsed, "token") {
            return ResolvedUrl::rewritten(url, embed_url(&token));
        }
    }

    if let Some(job_id) = JOB_ID_PATH.captures(parsed.path()).and_then(|c| c.get(1)) {
        if let Some(token) = greenhouse_token(url, &parsed) {
            return ResolvedUrl::rewritten(url, board_url(&token, job_id.as_str()));
        }
    }

    ResolvedUrl::unchanged(url)
}

/// Company board token, from a `for=` parameter, an embedded board path or an
/// embed script URL, in that order.
fn greenhouse_token(raw: &str, parsed: &Url) -> Option<String> {
    url_utils::query_value(parsed, "for")
        .or_else(|| {
            capture(&GREENHOUSE_BOARD_TOKEN, raw).filter(|token| !token.eq_ignore_ascii_case("embed"))
        })
        .or_else(|| capture(&GREENHOUSE_EMBED_TOKEN, raw))
}

fn capture(re: &regex::Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn board_url(token: &str, job_id: &str) -> String {
    format!("https://{GREENHOUSE_BOARD_HOST}/{token}/jobs/{job_id}")
}

fn embed_url(token: &str) -> String {
    format!("https://{GREENHOUSE_BOARD_HOST}/embed/job_app?token={token}")
}

// =============================================================================
// Lever
// =============================================================================

/// Strip trailing `/apply` segments from a Lever posting URL.
///
/// Repeated segments are stripped together, so the result is a fixed point:
/// canonicalizing it again changes nothing.
/// `lever.co` itself or one of its subdomains.
fn is_lever_host(host: &str) -> bool {
    host == LEVER_HOST || host.strip_suffix(LEVER_HOST).is_some_and(|rest| rest.ends_with('.'))
}

fn lever(url: &str) -> ResolvedUrl {
    let Some(mut parsed) = url_utils::parse_lenient(url) else {
        return ResolvedUrl::unchanged(url);
    };

    if !is_lever_host(&url_utils::host(&parsed)) {
        return ResolvedUrl::unchanged(url);
    }

    let path = parsed.path().to_string();
    let trimmed = LEVER_APPLY_SUFFIX.replace(&path, "");
    if trimmed == path {
        return ResolvedUrl::unchanged(url);
    }

    parsed.set_path(&trimmed);
    parsed.set_query(None);
    parsed.set_fragment(None);
    ResolvedUrl::rewritten(url, parsed.to_string())
}
