//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate: parsing, attribute access,
//! rule-driven queries, comment removal and block-aware text serialization.

use std::collections::HashSet;

use dom_query::NodeId;

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

/// A predicate over an element, used for ordered first-match lookups.
pub type Rule = fn(&Selection) -> bool;

/// Tags whose text never reaches the serialized output.
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "head", "title", "meta", "link",
];

/// Tags that start and end their own text run.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "caption", "dd", "details",
    "dialog", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "html", "li", "main", "nav", "ol",
    "option", "p", "pre", "section", "summary", "table", "tbody", "td", "tfoot", "th",
    "thead", "tr", "ul",
];

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attribute Operations ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Get an attribute value, or an empty string when absent.
#[inline]
#[must_use]
pub fn attr(sel: &Selection, name: &str) -> String {
    sel.attr(name).map(|s| s.to_string()).unwrap_or_default()
}

/// The `class`, `id` and `role` attributes joined with single spaces.
#[must_use]
pub fn class_id_role(sel: &Selection) -> String {
    format!("{} {} {}", attr(sel, "class"), attr(sel, "id"), attr(sel, "role"))
}

// === Querying ===

/// Query for the first element matching the rule, in document order.
#[must_use]
pub fn query<'a>(root: &Selection<'a>, rule: Rule) -> Option<Selection<'a>> {
    for node in root.select("*").nodes() {
        let sel = Selection::from(*node);
        if rule(&sel) {
            return Some(sel);
        }
    }
    None
}

/// Remove every element matching the rule, returning how many subtrees were
/// removed.
///
/// Elements inside an already removed subtree are skipped, so nested matches
/// are neither evaluated nor counted.
pub fn remove_matching(root: &Selection, rule: Rule) -> usize {
    let candidates: Vec<NodeRef> = root.select("*").nodes().to_vec();
    let mut removed_ids: HashSet<NodeId> = HashSet::new();
    for node in candidates {
        if has_ancestor_in(&node, &removed_ids) {
            continue;
        }
        let sel = Selection::from(node);
        if rule(&sel) {
            sel.remove();
            removed_ids.insert(node.id);
        }
    }
    removed_ids.len()
}

/// Whether any ancestor of `node` is in `ids`.
fn has_ancestor_in(node: &NodeRef, ids: &HashSet<NodeId>) -> bool {
    if ids.is_empty() {
        return false;
    }
    let mut current = node.parent();
    while let Some(parent) = current {
        if ids.contains(&parent.id) {
            return true;
        }
        current = parent.parent();
    }
    false
}

/// Remove all HTML comment nodes from the document, returning the count.
pub fn remove_comments(doc: &Document) -> usize {
    let mut comments = Vec::new();
    let mut stack = vec![doc.root()];
    while let Some(node) = stack.pop() {
        if node.is_comment() {
            comments.push(node);
            continue;
        }
        stack.extend(child_nodes(&node));
    }

    let count = comments.len();
    for comment in comments {
        comment.remove_from_parent();
    }
    count
}

/// All child nodes (elements, text and comments) in document order.
#[must_use]
pub fn child_nodes<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let mut children = Vec::new();
    let mut child = node.first_child();
    while let Some(current) = child {
        child = current.next_sibling();
        children.push(current);
    }
    children
}

// === Text Serialization ===

/// Controls which non-text content is rendered into serialized text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    /// Append ` (href)` after link text.
    pub links: bool,
    /// Render image alt text as its own line.
    pub images: bool,
}

enum Visit<'a> {
    Enter(NodeRef<'a>),
    Text(String),
    Break,
}

/// Serialize the text under `root`, one line per block-level text run.
///
/// Inline markup joins its text into the surrounding run; block elements
/// and `<br>`/`<hr>` separate runs. Every run is whitespace-collapsed and
/// trimmed, and empty runs are dropped.
#[must_use]
pub fn block_text(root: &NodeRef, opts: TextOptions) -> String {
    let mut out = String::new();
    let mut stack = vec![Visit::Enter(*root)];

    while let Some(visit) = stack.pop() {
        let node = match visit {
            Visit::Break => {
                out.push('\n');
                continue;
            }
            Visit::Text(text) => {
                out.push_str(&text);
                continue;
            }
            Visit::Enter(node) => node,
        };

        if node.is_text() {
            out.extend(node.text().chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
            continue;
        }
        if node.is_comment() {
            continue;
        }

        let tag = node
            .node_name()
            .map(|t| t.to_ascii_lowercase())
            .unwrap_or_default();
        if SKIPPED_TAGS.contains(&tag.as_str()) {
            continue;
        }

        match tag.as_str() {
            "br" | "hr" => {
                out.push('\n');
                continue;
            }
            "img" => {
                if opts.images {
                    if let Some(alt) = node.attr("alt").filter(|a| !a.trim().is_empty()) {
                        out.push('\n');
                        out.push_str(alt.trim());
                        out.push('\n');
                    }
                }
                continue;
            }
            _ => {}
        }

        if BLOCK_TAGS.contains(&tag.as_str()) {
            out.push('\n');
            stack.push(Visit::Break);
        }
        if tag == "a" && opts.links {
            if let Some(href) = node.attr("href").filter(|h| !h.trim().is_empty()) {
                stack.push(Visit::Text(format!(" ({})", href.trim())));
            }
        }
        stack.extend(child_nodes(&node).into_iter().rev().map(Visit::Enter));
    }

    join_runs(&out)
}

/// Serialize an HTML fragment (or a full document) to block text.
#[must_use]
pub fn fragment_text(html: &str) -> String {
    let doc = parse(html);
    block_text(&doc.root(), TextOptions::default())
}

fn join_runs(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
