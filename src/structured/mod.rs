//! Structured-Data Extraction
//!
//! Finds the first Schema.org `JobPosting` embedded as JSON-LD in a page and
//! normalizes it into a [`StructuredPosting`]. Broken JSON blocks are
//! skipped, never fatal.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::dom::{self, Document, Selection};

pub mod fields;

/// Media type prefix of JSON-LD script blocks.
const JSON_LD_TYPE: &str = "application/ld+json";

/// Schema.org type name identifying a job posting.
const JOB_POSTING_TYPE: &str = "JobPosting";

/// A job posting normalized from JSON-LD.
///
/// Every field is optional. A posting is only returned when at least one of
/// `title`, `description` or `company` is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredPosting {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Raw description, usually HTML.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_through: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

impl StructuredPosting {
    /// The description rendered to plain text.
    ///
    /// HTML descriptions are serialized one block per line. Descriptions
    /// whose markup was entity-escaped are decoded and rendered a second
    /// time. Returns an empty string when there is no description.
    #[must_use]
    pub fn description_text(&self) -> String {
        let Some(raw) = self.description.as_deref() else {
            return String::new();
        };

        if !raw.contains('<') && !raw.contains('&') {
            return raw
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
        }

        let text = dom::fragment_text(raw);
        if raw.contains("&lt;") && text.contains('<') {
            dom::fragment_text(&text)
        } else {
            text
        }
    }

    fn has_identity(&self) -> bool {
        self.title.is_some() || self.description.is_some() || self.company.is_some()
    }
}

/// Title and meta description of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

/// Extract the first JSON-LD `JobPosting` from an HTML page.
///
/// # Example
///
/// ```rust
/// use job_extract::extract_structured;
///
/// let html = r#"<script type="application/ld+json">
///   {"@type": "JobPosting", "title": "Data Engineer", "hiringOrganization": {"name": "Acme"}}
/// </script>"#;
///
/// let posting = extract_structured(html).unwrap();
/// assert_eq!(posting.title.as_deref(), Some("Data Engineer"));
/// assert_eq!(posting.company.as_deref(), Some("Acme"));
/// ```
#[must_use]
pub fn extract_structured(html: &str) -> Option<StructuredPosting> {
    extract_structured_from(&dom::parse(html))
}

/// Extract the first JSON-LD `JobPosting` from a parsed document.
#[must_use]
pub fn extract_structured_from(doc: &Document) -> Option<StructuredPosting> {
    for (index, node) in doc.select("script[type]").nodes().iter().enumerate() {
        let script = Selection::from(*node);
        let media_type = dom::attr(&script, "type").trim().to_ascii_lowercase();
        if !media_type.starts_with(JSON_LD_TYPE) {
            continue;
        }

        let payload = script.text();
        let payload = payload.trim();
        if payload.is_empty() {
            continue;
        }

        let data: Value = match serde_json::from_str(payload) {
            Ok(v) => v,
            Err(e) => {
                debug!(block = index, error = %e, "skipping malformed JSON-LD block");
                continue;
            }
        };

        if let Some((shape, item)) = find_job_posting(&data) {
            debug!(block = index, shape, "found JobPosting");
            let posting = normalize(item);
            if posting.has_identity() {
                return Some(posting);
            }
            debug!(block = index, "JobPosting has no title, description or company");
            return None;
        }
    }

    None
}

/// Title and meta description of an HTML page.
#[must_use]
pub fn page_summary(html: &str) -> PageSummary {
    page_summary_from(&dom::parse(html))
}

/// Title and meta description of a parsed document.
#[must_use]
pub fn page_summary_from(doc: &Document) -> PageSummary {
    let title = doc.select("title").first().text();
    let description = doc.select(r#"meta[name="description"]"#).first();

    PageSummary {
        title: non_blank(&title),
        meta_description: non_blank(&dom::attr(&description, "content")),
    }
}

/// Locate the first `JobPosting` in a single object, an `@graph` container
/// or an array of objects.
fn find_job_posting(data: &Value) -> Option<(&'static str, &Map<String, Value>)> {
    match data {
        Value::Object(item) => {
            if is_job_posting(item) {
                return Some(("object", item));
            }
            match item.get("@graph") {
                Some(Value::Array(graph)) => first_posting(graph).map(|found| ("graph", found)),
                _ => None,
            }
        }
        Value::Array(items) => first_posting(items).map(|found| ("array", found)),
        _ => None,
    }
}

fn first_posting(items: &[Value]) -> Option<&Map<String, Value>> {
    items
        .iter()
        .filter_map(Value::as_object)
        .find(|item| is_job_posting(item))
}

/// `@type` contains `JobPosting`, as a string or in an array of strings.
fn is_job_posting(item: &Map<String, Value>) -> bool {
    match item.get("@type") {
        Some(Value::String(t)) => t.contains(JOB_POSTING_TYPE),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.contains(JOB_POSTING_TYPE)),
        _ => false,
    }
}

fn normalize(item: &Map<String, Value>) -> StructuredPosting {
    StructuredPosting {
        title: fields::first_text(item, &["title", "name"]),
        description: fields::description(item),
        company: fields::company(item),
        location: fields::location(item),
        employment_type: fields::first_text(item, &["employmentType"]),
        date_posted: fields::first_text(item, &["datePosted"]),
        valid_through: fields::first_text(item, &["validThrough"]),
        salary: fields::salary(item),
        experience: fields::first_text(item, &["experienceRequirements"]),
        education: fields::first_text(item, &["educationRequirements"]),
        skills: fields::skills(item),
        industry: fields::first_text(item, &["industry"]),
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}
