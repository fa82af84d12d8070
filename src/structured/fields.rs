//! Per-field shape normalization for JSON-LD job postings.
//!
//! Schema.org fields arrive as strings, numbers, objects or arrays depending
//! on the feed. Each helper matches on the `serde_json::Value` variant and
//! handles every shape explicitly.

use serde_json::{Map, Value};

const DEFAULT_CURRENCY: &str = "USD";
const DEFAULT_UNIT: &str = "YEAR";

/// Keys tried, in order, when a scalar field is given as an object.
const OBJECT_TEXT_KEYS: &[&str] = &["@value", "name", "value"];

/// Address parts, in output order.
const ADDRESS_PARTS: &[&str] = &[
    "streetAddress",
    "addressLocality",
    "addressRegion",
    "postalCode",
    "addressCountry",
];

/// Whether a JSON value carries anything worth keeping.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(_) => true,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Flatten a scalar-ish value to text.
///
/// Strings are trimmed, numbers stringified, objects reduced to their first
/// non-empty `@value`, `name` or `value` entry, and arrays flattened
/// element-wise and joined with `", "`.
#[must_use]
pub fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s.trim()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => OBJECT_TEXT_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(text_of),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(text_of).collect();
            non_empty(&parts.join(", "))
        }
        Value::Null | Value::Bool(_) => None,
    }
}

/// Text of the first of `keys` that yields a non-empty value.
#[must_use]
pub fn first_text(item: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| item.get(*key))
        .find_map(text_of)
}

/// The `description` field, kept verbatim apart from outer whitespace.
#[must_use]
pub fn description(item: &Map<String, Value>) -> Option<String> {
    match item.get("description")? {
        Value::String(s) => non_empty(s.trim()),
        other => text_of(other),
    }
}

/// Hiring organization: a bare string, or an object's `name` then `legalName`.
#[must_use]
pub fn company(item: &Map<String, Value>) -> Option<String> {
    match item.get("hiringOrganization")? {
        Value::String(s) => non_empty(s.trim()),
        Value::Object(org) => first_text(org, &["name", "legalName"]),
        Value::Array(orgs) => orgs.iter().find_map(|org| match org {
            Value::Object(org) => first_text(org, &["name", "legalName"]),
            other => text_of(other),
        }),
        _ => None,
    }
}

/// Job location(s), with multiple locations joined by `"; "`.
#[must_use]
pub fn location(item: &Map<String, Value>) -> Option<String> {
    match item.get("jobLocation")? {
        Value::String(s) => non_empty(s.trim()),
        Value::Object(place) => place_text(place),
        Value::Array(places) => {
            let parts: Vec<String> = places
                .iter()
                .filter_map(|place| match place {
                    Value::Object(place) => place_text(place),
                    Value::String(s) => non_empty(s.trim()),
                    _ => None,
                })
                .collect();
            non_empty(&parts.join("; "))
        }
        _ => None,
    }
}

fn place_text(place: &Map<String, Value>) -> Option<String> {
    let from_address = match place.get("address") {
        Some(Value::String(s)) => non_empty(s.trim()),
        Some(Value::Object(address)) => {
            let parts: Vec<String> = ADDRESS_PARTS
                .iter()
                .filter_map(|key| address.get(*key))
                .filter_map(text_of)
                .collect();
            non_empty(&parts.join(", "))
        }
        _ => None,
    };

    from_address.or_else(|| first_text(place, &["name"]))
}

/// Salary text from `baseSalary` or `estimatedSalary`.
///
/// Formats, with currency defaulting to USD and unit to YEAR:
/// - both bounds: `"USD 120,000 - 150,000 per YEAR"`
/// - minimum only: `"USD 120,000+ per YEAR"`
/// - single nested value: `"USD 60 per HOUR"`
/// - scalar value: `"USD 95,000"`
///
/// A maximum without a minimum yields nothing.
#[must_use]
pub fn salary(item: &Map<String, Value>) -> Option<String> {
    ["baseSalary", "estimatedSalary"]
        .iter()
        .filter_map(|key| item.get(*key))
        .find_map(salary_of)
}

fn salary_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s.trim()),
        Value::Array(entries) => entries.iter().find_map(salary_of),
        Value::Object(salary) => monetary_amount(salary),
        _ => None,
    }
}

fn monetary_amount(salary: &Map<String, Value>) -> Option<String> {
    let currency = first_text(salary, &["currency"]).unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    match salary.get("value")? {
        Value::Object(range) => {
            let unit = first_text(range, &["unitText"])
                .or_else(|| first_text(salary, &["unitText"]))
                .unwrap_or_else(|| DEFAULT_UNIT.to_string());
            let min = range.get("minValue").and_then(amount);
            let max = range.get("maxValue").and_then(amount);
            let single = range.get("value").and_then(amount);

            match (min, max, single) {
                (Some(min), Some(max), _) => Some(format!("{currency} {min} - {max} per {unit}")),
                (Some(min), None, _) => Some(format!("{currency} {min}+ per {unit}")),
                (None, None, Some(value)) => Some(format!("{currency} {value} per {unit}")),
                _ => None,
            }
        }
        scalar => amount(scalar).map(|value| format!("{currency} {value}")),
    }
}

/// Format a numeric amount with thousands separators.
///
/// Integers are grouped, fractional amounts keep their fraction. Numeric
/// strings are parsed first; other strings pass through trimmed.
#[must_use]
pub fn amount(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(group_thousands(&i.to_string()))
            } else {
                n.as_f64().map(format_float)
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                Some(group_thousands(&i.to_string()))
            } else if let Ok(f) = s.parse::<f64>() {
                Some(format_float(f))
            } else {
                non_empty(s)
            }
        }
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        return group_thousands(&(f as i64).to_string());
    }
    let text = format!("{f}");
    match text.split_once('.') {
        Some((int, frac)) => format!("{}.{frac}", group_thousands(int)),
        None => text,
    }
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}")
}

/// Skills from `skills` or `qualifications`.
///
/// A bare string is one skill; a list is stringified element-wise.
#[must_use]
pub fn skills(item: &Map<String, Value>) -> Vec<String> {
    let Some(value) = ["skills", "qualifications"]
        .iter()
        .filter_map(|key| item.get(*key))
        .find(|value| is_truthy(value))
    else {
        return Vec::new();
    };

    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => non_empty(s.trim()),
                other => text_of(other).or_else(|| non_empty(&other.to_string())),
            })
            .collect(),
        other => text_of(other).into_iter().collect(),
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
