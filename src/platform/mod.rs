//! Source Classification
//!
//! Maps a job URL to the recruiting platform that serves it. Rules are an
//! ordered list evaluated top-down and the first match wins, so a career page
//! proxying a Greenhouse `gh_jid` parameter classifies as Greenhouse even when
//! a weaker rule further down would also match.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::patterns::{GREENHOUSE_URL, LEVER_URL, WORKDAY_URL};
use crate::url_utils;

pub mod canonical;

pub use canonical::{api_endpoint, canonicalize, ResolvedUrl};

/// Recruiting platform a job page is served from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformTag {
    Greenhouse,
    Lever,
    Workday,
    /// Any site not covered by the platform rules.
    #[default]
    Generic,
}

impl PlatformTag {
    /// Lower-case identifier, as used in serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Greenhouse => "greenhouse",
            Self::Lever => "lever",
            Self::Workday => "workday",
            Self::Generic => "generic",
        }
    }

    /// Human-readable platform name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Greenhouse => "Greenhouse",
            Self::Lever => "Lever",
            Self::Workday => "Workday",
            Self::Generic => "Generic Job Site",
        }
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A classification rule over the lower-cased URL.
type ClassifyRule = fn(&str) -> bool;

/// Ordered classification rules. Evaluation stops at the first match.
const RULES: &[(PlatformTag, &str, ClassifyRule)] = &[
    (PlatformTag::Greenhouse, "greenhouse-url", is_greenhouse_url),
    (PlatformTag::Greenhouse, "gh_jid-param", has_gh_jid_param),
    (PlatformTag::Lever, "lever-url", is_lever_url),
    (PlatformTag::Workday, "workday-url", is_workday_url),
];

/// Classify a job URL into a platform tag.
///
/// Never fails: empty, malformed or unknown URLs classify as
/// [`PlatformTag::Generic`].
///
/// # Example
///
/// ```rust
/// use job_extract::{classify, PlatformTag};
///
/// assert_eq!(classify("https://jobs.lever.co/acme/1234"), PlatformTag::Lever);
/// assert_eq!(classify("https://careers.acme.com/jobs?gh_jid=42"), PlatformTag::Greenhouse);
/// assert_eq!(classify("not a url"), PlatformTag::Generic);
/// ```
#[must_use]
pub fn classify(url: &str) -> PlatformTag {
    let lower = url.trim().to_lowercase();
    if lower.is_empty() {
        return PlatformTag::Generic;
    }

    for (platform, name, rule) in RULES {
        if rule(&lower) {
            debug!(url, rule = *name, platform = platform.as_str(), "classified job url");
            return *platform;
        }
    }

    debug!(url, "no platform rule matched, using generic");
    PlatformTag::Generic
}

fn is_greenhouse_url(url: &str) -> bool {
    GREENHOUSE_URL.iter().any(|re| re.is_match(url))
}

/// The raw-string patterns miss `gh_jid` when it is percent-encoded or has a
/// non-numeric value, so the decoded query is inspected as well.
fn has_gh_jid_param(url: &str) -> bool {
    url_utils::parse_lenient(url).is_some_and(|parsed| url_utils::has_query_key(&parsed, "gh_jid"))
}

fn is_lever_url(url: &str) -> bool {
    LEVER_URL.iter().any(|re| re.is_match(url))
}

fn is_workday_url(url: &str) -> bool {
    WORKDAY_URL.iter().any(|re| re.is_match(url))
}
