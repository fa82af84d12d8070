//! Boilerplate Stripping
//!
//! Turns a raw job page into cleaned prose in a fixed order of passes:
//!
//! 1. remove non-content tags (scripts, navigation, forms, embeds)
//! 2. remove elements whose `class`/`id`/`role` look like boilerplate
//! 3. remove comment nodes
//! 4. pick the best content root and serialize it one block per line
//! 5. suppress legal and consent sections line by line ([`legal`])
//! 6. normalize whitespace and drop noise lines ([`normalize`])

use std::fmt;
use std::ops::Deref;

use serde::Serialize;
use tracing::debug;

use crate::dom::{self, Document, Rule, Selection, TextOptions};
use crate::options::Options;
use crate::patterns::{BOILERPLATE_ATTR, BOILERPLATE_FRAGMENT, CONTENT_ROOT_CLASS};

pub mod legal;
pub mod normalize;

/// Tags whose whole subtree never holds posting content.
const REMOVED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "iframe", "svg", "canvas", "nav", "header",
    "footer", "aside", "form", "button", "input", "select", "textarea", "label", "object",
    "embed", "applet", "advertisement", "ads", "ad",
];

/// Content root candidates, in priority order.
const CONTENT_ROOTS: &[(&str, Rule)] = &[
    ("main", is_main_tag),
    ("article", is_article_tag),
    ("role-main", has_main_role),
    ("content-class", has_content_class),
];

/// Text left after boilerplate stripping.
///
/// Never contains markup, and never more than one blank line in a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CleanedText(String);

impl CleanedText {
    /// Consume the wrapper, returning the text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for CleanedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CleanedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CleanedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CleanedText> for String {
    fn from(text: CleanedText) -> Self {
        text.0
    }
}

/// Strip boilerplate from an HTML page using default options.
///
/// # Example
///
/// ```rust
/// use job_extract::strip;
///
/// let html = r#"<nav class="main-nav">Home | Jobs</nav><main><h1>Software Engineer</h1></main>"#;
/// let text = strip(html);
/// assert!(text.contains("Software Engineer"));
/// assert!(!text.contains("Home"));
/// ```
#[must_use]
pub fn strip(html: &str) -> CleanedText {
    strip_with_options(html, &Options::default())
}

/// Strip boilerplate from an HTML page.
#[must_use]
pub fn strip_with_options(html: &str, options: &Options) -> CleanedText {
    let doc = dom::parse(html);

    let (tags, attrs) = prune_boilerplate(&doc);
    let comments = dom::remove_comments(&doc);

    let (root_name, text) = serialize_content_root(&doc);
    debug!(
        tags_removed = tags,
        boilerplate_removed = attrs,
        comments_removed = comments,
        root = root_name,
        chars = text.chars().count(),
        "stripped page"
    );

    let text = legal::suppress_legal_sections(&text, options);
    CleanedText(normalize::final_cleanup(&text))
}

/// Remove boilerplate tags and boilerplate-named elements in place.
///
/// Returns the number of tag subtrees and attribute-matched elements removed.
pub(crate) fn prune_boilerplate(doc: &Document) -> (usize, usize) {
    let tags = REMOVED_TAGS.join(",");
    let removed = doc.select(&tags);
    let tag_count = removed.length();
    removed.remove();

    let attr_count = dom::remove_matching(&doc.select("html"), is_boilerplate_element);
    (tag_count, attr_count)
}

/// Whether an element's `class id role` string names boilerplate.
///
/// Distinctive names match anywhere (`relatedjobs`); short ones such as `nav`
/// or `ad` must be whole tokens once camelCase is split (`adSlot`).
/// `<html>` and `<body>` are never boilerplate, whatever their classes say.
fn is_boilerplate_element(sel: &Selection) -> bool {
    if matches!(dom::tag_name(sel).as_deref(), Some("html" | "body")) {
        return false;
    }
    let names = dom::class_id_role(sel);
    if names.trim().is_empty() {
        return false;
    }
    BOILERPLATE_FRAGMENT.is_match(&names) || BOILERPLATE_ATTR.is_match(&split_camel_case(&names))
}

/// Insert a space at each lower-to-upper case boundary: `mainNav` -> `main Nav`.
fn split_camel_case(names: &str) -> String {
    let mut out = String::with_capacity(names.len() + 8);
    let mut prev_lower = false;
    for c in names.chars() {
        if prev_lower && c.is_uppercase() {
            out.push(' ');
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        out.push(c);
    }
    out
}

fn serialize_content_root(doc: &Document) -> (&'static str, String) {
    let html = doc.select("html");

    for (name, rule) in CONTENT_ROOTS {
        if let Some(root) = dom::query(&html, *rule) {
            if let Some(node) = root.nodes().first() {
                return (*name, dom::block_text(node, TextOptions::default()));
            }
        }
    }

    if let Some(body) = doc.select("body").nodes().first() {
        return ("body", dom::block_text(body, TextOptions::default()));
    }
    ("document", dom::block_text(&doc.root(), TextOptions::default()))
}

fn is_main_tag(sel: &Selection) -> bool {
    dom::tag_name(sel).as_deref() == Some("main")
}

fn is_article_tag(sel: &Selection) -> bool {
    dom::tag_name(sel).as_deref() == Some("article")
}

fn has_main_role(sel: &Selection) -> bool {
    dom::attr(sel, "role").trim().eq_ignore_ascii_case("main")
}

fn has_content_class(sel: &Selection) -> bool {
    CONTENT_ROOT_CLASS.is_match(&dom::attr(sel, "class"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_removed_main_kept() {
        let html = r#"<html><body><nav class="main-nav"><a href="/">Home</a></nav><main><h1>Software Engineer</h1></main></body></html>"#;
        let text = strip(html);
        assert!(text.contains("Software Engineer"));
        assert!(!text.contains("main-nav"));
        assert!(!text.contains("Home"));
    }

    #[test]
    fn test_removes_boilerplate_by_attributes() {
        let html = r#"<body>
            <div class="cookie-banner">We use cookies to improve things</div>
            <div id="share-widget">Share on LinkedIn</div>
            <div role="complementary">Similar jobs nearby</div>
            <div class="posting"><p>Build distributed systems in Rust.</p></div>
        </body>"#;
        let text = strip(html);
        assert_eq!(&*text, "Build distributed systems in Rust.");
    }

    #[test]
    fn test_split_camel_case() {
        assert_eq!(split_camel_case("mainNav adSlot"), "main Nav ad Slot");
        assert_eq!(split_camel_case("JobDetails"), "Job Details");
        assert_eq!(split_camel_case("main-nav"), "main-nav");
    }

    #[test]
    fn test_camel_case_boilerplate_removed() {
        let html = r#"<body>
            <div class="mainNav">Jobs Teams</div>
            <div id="adSlot">Sponsored listing</div>
            <div class="postingBody"><p>Run the build infrastructure.</p></div>
        </body>"#;
        assert_eq!(strip(html).to_string(), "Run the build infrastructure.");
    }

    #[test]
    fn test_body_classes_do_not_remove_page() {
        let html = r#"<html><body class="has-sidebar cookie-consent-pending"><p>Design APIs for payments.</p></body></html>"#;
        assert_eq!(strip(html).to_string(), "Design APIs for payments.");
    }

    #[test]
    fn test_content_root_priority() {
        let html = r#"<body>
            <div class="job-description"><p>Class root text</p></div>
            <article><p>Article text</p></article>
            <main><p>Main text</p></main>
        </body>"#;
        assert_eq!(strip(html).to_string(), "Main text");

        let html = r#"<body><p>Outside</p><div role="main"><p>Role text</p></div></body>"#;
        assert_eq!(strip(html).to_string(), "Role text");

        let html = r#"<body><p>Outside</p><section class="JobDetails"><p>Class text</p></section></body>"#;
        assert_eq!(strip(html).to_string(), "Class text");
    }

    #[test]
    fn test_falls_back_to_body() {
        let html = "<body><h2>Backend Engineer</h2><p>Work on storage.</p></body>";
        assert_eq!(strip(html).into_string(), "Backend Engineer\nWork on storage.");
    }

    #[test]
    fn test_comments_and_forms_removed() {
        let html = r#"<main><!-- tracking pixel --><p>Own the data platform.</p>
            <form><label>Email</label><input name="email"><button>Apply</button></form></main>"#;
        let text = strip(html);
        assert_eq!(&*text, "Own the data platform.");
    }

    #[test]
    fn test_legal_section_suppressed() {
        let html = r#"<main>
            <h2>Requirements:</h2><p>Three years of Rust.</p>
            <h3>Equal Opportunity Employer</h3><p>We celebrate diversity.</p>
            <h2>Benefits:</h2><p>Remote-first team.</p>
            <p>© 2024 Acme Corp</p>
        </main>"#;
        assert_eq!(
            strip(html).into_string(),
            "Requirements:\nThree years of Rust.\nBenefits:\nRemote-first team."
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(strip("").into_string(), "");
        assert_eq!(strip("<html><body></body></html>").into_string(), "");
    }
}
