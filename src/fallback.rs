//! Fallback Text Extraction
//!
//! Best-effort readability extraction for pages where boilerplate stripping
//! did not produce usable job content. Readability (via `dom_smoothie`) runs
//! on a pre-cleaned copy of the page; when it yields nothing, a paragraph
//! scrape baseline takes over. This tier never fails: every internal problem
//! ends in an empty string.

use std::collections::HashSet;

use tracing::debug;

use crate::cleaner::{self, normalize};
use crate::dom::{self, Document, NodeRef, Selection, TextOptions};
use crate::options::FallbackOptions;
use crate::patterns::COMMENT_SECTION;

/// Tags removed from the page before any fallback strategy runs.
const ALWAYS_REMOVED: &str = "script, style, noscript";

/// Social share plugins that inject buttons into the content body.
const SHARE_PLUGIN_SELECTOR: &str = "[class*=\"dpsp-\"], [class*=\"wabtn\"], [class*=\"addtoany\"], [class*=\"shareaholic\"], [class*=\"share-wrapper\"], [class*=\"social-share\"], [class*=\"share-buttons\"], [id*=\"share-buttons\"], [class*=\"post-share\"], [class*=\"entry-share\"]";

/// Block tags scraped by the baseline, without and with table cells.
const BASELINE_TAGS: &[&str] = &["blockquote", "pre", "p", "li"];
const BASELINE_TABLE_TAGS: &[&str] = &["blockquote", "pre", "p", "li", "td", "th"];

/// Minimum characters for an `<article>` to be taken whole by the baseline.
const BASELINE_ARTICLE_MIN_CHARS: usize = 100;

/// Extract text with default fallback options.
///
/// # Example
///
/// ```rust
/// use job_extract::extract_fallback;
///
/// assert_eq!(extract_fallback("", None), "");
/// ```
#[must_use]
pub fn extract_fallback(html: &str, url: Option<&str>) -> String {
    extract_fallback_with_options(html, url, &FallbackOptions::default())
}

/// Extract text from a page with readability, falling back to a paragraph
/// scrape.
///
/// `url` is only a hint for resolving relative links; an unparsable URL is
/// ignored.
#[must_use]
pub fn extract_fallback_with_options(
    html: &str,
    url: Option<&str>,
    options: &FallbackOptions,
) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let doc = dom::parse(html);
    prepare(&doc, options);

    let text_options = TextOptions {
        links: options.include_links,
        images: options.include_images,
    };

    let text = match readability(&doc, url, options, text_options) {
        Some(text) if !text.trim().is_empty() => {
            debug!(chars = text.chars().count(), "readability produced content");
            text
        }
        _ => {
            let text = baseline(&doc, options, text_options);
            debug!(chars = text.chars().count(), "baseline scrape produced content");
            text
        }
    };

    let text = if options.deduplicate {
        dedupe_lines(&text)
    } else {
        text
    };
    normalize::final_cleanup(&text)
}

/// Remove content every strategy should ignore.
fn prepare(doc: &Document, options: &FallbackOptions) {
    doc.select(ALWAYS_REMOVED).remove();
    dom::remove_comments(doc);

    if !options.include_comments {
        let removed = dom::remove_matching(&doc.select("html"), is_comment_section);
        debug!(removed, "removed comment sections");
    }

    doc.select(SHARE_PLUGIN_SELECTOR).remove();

    if options.favor_precision {
        let (tags, attrs) = cleaner::prune_boilerplate(doc);
        debug!(tags, attrs, "pruned boilerplate for precision");
    }

    if !options.include_tables {
        doc.select("table").remove();
    }
}

fn is_comment_section(sel: &Selection) -> bool {
    if matches!(dom::tag_name(sel).as_deref(), Some("html" | "body")) {
        return false;
    }
    let names = format!("{} {}", dom::attr(sel, "class"), dom::attr(sel, "id"));
    COMMENT_SECTION.is_match(&names)
}

#[cfg(feature = "readability")]
fn readability(
    doc: &Document,
    url: Option<&str>,
    options: &FallbackOptions,
    text_options: TextOptions,
) -> Option<String> {
    use std::panic::{self, AssertUnwindSafe};

    use dom_smoothie::{Config, Readability};
    use tracing::warn;

    use crate::url_utils;

    let document_url = url.and_then(url_utils::parse_lenient).map(|u| u.to_string());
    let config = Config {
        max_elements_to_parse: options.max_elements_to_parse,
        ..Config::default()
    };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut reader =
            Readability::with_document(doc.clone(), document_url.as_deref(), Some(config)).ok()?;
        let article = reader.parse().ok()?;
        let content = dom::parse(&article.content);
        Some(dom::block_text(&content.root(), text_options))
    }));

    match outcome {
        Ok(text) => text,
        Err(_) => {
            warn!("readability panicked, using baseline");
            None
        }
    }
}

#[cfg(not(feature = "readability"))]
fn readability(
    _doc: &Document,
    _url: Option<&str>,
    _options: &FallbackOptions,
    _text_options: TextOptions,
) -> Option<String> {
    None
}

/// Baseline scrape: a substantial `<article>`, else deduplicated block text
/// runs, else the whole body.
fn baseline(doc: &Document, options: &FallbackOptions, text_options: TextOptions) -> String {
    if let Some(article) = doc.select("article").nodes().first() {
        let text = dom::block_text(article, text_options);
        if text.chars().count() > BASELINE_ARTICLE_MIN_CHARS {
            return text;
        }
    }

    let tags = if options.include_tables {
        BASELINE_TABLE_TAGS
    } else {
        BASELINE_TAGS
    };

    let mut seen = HashSet::new();
    let mut parts = Vec::new();
    for node in doc.select(&tags.join(", ")).nodes() {
        if has_ancestor(node, tags) {
            continue;
        }

        let entry = dom::block_text(node, text_options);
        let lower = entry.to_lowercase();
        if (lower.contains("cookie") && lower.contains("consent"))
            || lower.contains("tracking technolog")
        {
            continue;
        }

        if !entry.is_empty() && seen.insert(entry.clone()) {
            parts.push(entry);
        }
    }

    if !parts.is_empty() {
        return parts.join("\n");
    }

    doc.select("body")
        .nodes()
        .first()
        .map(|body| dom::block_text(body, text_options))
        .unwrap_or_default()
}

/// Whether any ancestor of `node` has one of `tags`.
fn has_ancestor(node: &NodeRef, tags: &[&str]) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if let Some(name) = parent.node_name() {
            if tags.contains(&name.to_ascii_lowercase().as_str()) {
                return true;
            }
        }
        current = parent.parent();
    }
    false
}

/// Keep the first occurrence of each non-blank line.
fn dedupe_lines(text: &str) -> String {
    let mut seen = HashSet::new();
    text.lines()
        .filter(|line| {
            let line = line.trim();
            line.is_empty() || seen.insert(line.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
