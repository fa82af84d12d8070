//! Compiled regex patterns for job content resolution.
//!
//! All patterns are compiled once at first use via `LazyLock`.
//! Patterns are organized by the pipeline stage that consumes them.
//! Ordered lists are `Vec`s, never sets: the first matching entry wins.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

fn compile_all(patterns: &[&str], what: &str) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).unwrap_or_else(|e| panic!("{what} regex {p:?}: {e}")))
        .collect()
}

// =============================================================================
// Platform Detection Patterns
// =============================================================================

/// URL patterns identifying Greenhouse job pages, evaluated against the
/// lower-cased URL.
pub static GREENHOUSE_URL: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(
        &[
            r"boards\.greenhouse\.io",
            r"greenhouse\.io/embed",
            r"[?&]gh_jid=\d+",
            r"job_app\.greenhouse\.io",
        ],
        "GREENHOUSE_URL",
    )
});

/// URL patterns identifying Lever job pages.
pub static LEVER_URL: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[r"jobs\.lever\.co", r"lever\.co/[^/]+/[a-f0-9-]+"], "LEVER_URL")
});

/// URL patterns identifying Workday job pages.
pub static WORKDAY_URL: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(
        &[
            r"myworkdayjobs\.com",
            r"\.workday\.com/.*?/job/",
            r"wd\d+\.myworkdaysite\.com",
        ],
        "WORKDAY_URL",
    )
});

// =============================================================================
// Canonicalization Patterns
// =============================================================================

/// Company token embedded in a board path anywhere in the URL.
pub static GREENHOUSE_BOARD_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)boards\.greenhouse\.io/([^/?#&]+)").expect("GREENHOUSE_BOARD_TOKEN regex")
});

/// Company token carried by the embed script URL.
pub static GREENHOUSE_EMBED_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)greenhouse\.io/embed/job_board/js\?for=([^&#]+)")
        .expect("GREENHOUSE_EMBED_TOKEN regex")
});

/// Numeric job id in a `/jobs/{id}` or `/job/{id}` path.
pub static JOB_ID_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/jobs?/(\d+)").expect("JOB_ID_PATH regex"));

/// One or more trailing `/apply` segments of a Lever posting path.
pub static LEVER_APPLY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:/apply)+/?$").expect("LEVER_APPLY_SUFFIX regex"));

/// Lever posting UUID at the end of a path.
pub static LEVER_POSTING_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/([a-f0-9-]{36})/?$").expect("LEVER_POSTING_ID regex"));

/// Lever company slug following the host.
pub static LEVER_COMPANY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"lever\.co/([^/?#]+)").expect("LEVER_COMPANY regex"));

// =============================================================================
// Boilerplate Detection Patterns
// =============================================================================

/// Matches the concatenated `class id role` string of boilerplate elements.
///
/// Names must appear as whole tokens, where `-` and `_` also separate tokens,
/// so `main-nav` and `cookie-banner` match but `canvas-wrapper` and `loading`
/// do not. Callers split camelCase names into tokens first.
pub static BOILERPLATE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[\s_-])(?:nav|navbar|navigation|menu|menubar|breadcrumbs?|crumbs?|pagination|pager|cookies?|consent|gdpr|banner|popup|modal|overlay|sidebar|footer|site[-_]?header|contentinfo|complementary|ads?|advert|advertisement|promo|promotion|sponsored|social|share|sharing|related|similar|recommended|recommendations?|newsletter|subscribe|subscription|sign[-_]?up|sign[-_]?in|log[-_]?in|register|legal|privacy|terms|disclaimer|copyright|search|searchbox|searchbar)(?:$|[\s_-])",
    )
    .expect("BOILERPLATE_ATTR regex")
});

/// Boilerplate names distinctive enough to match anywhere inside a name,
/// such as `relatedjobs`, `sitenavigation` or `cookiebar`.
pub static BOILERPLATE_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)navigation|navbar|breadcrumb|pagination|cookie|consent|gdpr|banner|popup|sidebar|footer|advert|sponsored|social|sharing|share[-_]?(?:buttons?|links?|bar|widget)|related|similar[-_]?(?:jobs|positions|roles)|recommend|newsletter|subscribe|sign[-_]?up|login|disclaimer|copyright|privacy|search[-_]?(?:box|bar|form)",
    )
    .expect("BOILERPLATE_FRAGMENT regex")
});

/// Matches class names of containers likely to hold the posting body.
pub static CONTENT_ROOT_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)job|content|description").expect("CONTENT_ROOT_CLASS regex"));

/// Matches class/id names of user comment sections.
pub static COMMENT_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(comment|comments|comment[-_]?list|respond|replies|discussion|disqus|fb[-_]?comments)\b")
        .expect("COMMENT_SECTION regex")
});

// =============================================================================
// Legal Text Patterns
// =============================================================================

/// Ordered legal-boilerplate line rules, as `(name, pattern)` pairs.
pub static LEGAL_LINE_RULES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("equal-opportunity", r"(?i)equal\s+(?:employment\s+)?opportunity\s+employer"),
        ("eoe", r"(?i)we\s+are\s+an?\s+e\.?o\.?e\.?"),
        ("affirmative-action", r"(?i)affirmative\s+action"),
        ("terms-privacy", r"(?i)terms\s+(?:of\s+)?(?:use|service)|privacy\s+policy"),
        ("copyright", r"(?i)©\s*\d{4}|copyright\s+(?:©\s*)?\d{4}"),
        ("rights-reserved", r"(?i)all\s+rights\s+reserved"),
        ("cookie-policy", r"(?i)cookie\s+(?:policy|settings|preferences)"),
        ("consent", r"(?i)by\s+(?:clicking|applying|submitting)"),
        ("cookie-notice", r"(?i)we\s+use\s+cookies|this\s+site\s+uses\s+cookies"),
    ]
    .into_iter()
    .map(|(name, pattern)| {
        let regex = Regex::new(pattern).unwrap_or_else(|e| panic!("legal rule {name}: {e}"));
        (name, regex)
    })
    .collect()
});

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches three or more consecutive newlines.
pub static MULTIPLE_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("MULTIPLE_NEWLINES regex"));

/// Matches runs of horizontal whitespace.
pub static HORIZONTAL_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\u{a0}]+").expect("HORIZONTAL_WHITESPACE regex"));

/// Matches leading/trailing spaces on lines.
pub static LINE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^ +| +$").expect("LINE_WHITESPACE regex"));

/// Matches lines made only of punctuation, symbols and whitespace.
pub static PUNCTUATION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s\p{P}\p{S}]+$").expect("PUNCTUATION_LINE regex"));
