//! Result types for pipeline output.
//!
//! An [`ExtractionResult`] carries the final text together with where it came
//! from: the tier that produced it, the platform and canonical URL, any
//! structured posting found on the page, and the outcome of every tier tried.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::platform::{PlatformTag, ResolvedUrl};
use crate::structured::{PageSummary, StructuredPosting};

/// Extraction tier that produced a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    /// JSON-LD `JobPosting` description.
    Structured,
    /// Boilerplate-stripped page text.
    Cleaned,
    /// Readability fallback text.
    Fallback,
}

impl ContentSource {
    /// Lower-case identifier, as used in serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::Cleaned => "cleaned",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one extraction tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierAttempt {
    pub source: ContentSource,
    /// Length of the tier's text in characters.
    pub chars: usize,
    pub meaningful: bool,
}

/// Output of the extraction pipeline.
///
/// A result with `meaningful == false` is the unresolved outcome: no tier
/// passed validation, and `text` is the longest text any tier produced.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Extracted job text.
    pub text: String,

    /// Tier that produced `text`.
    pub source: ContentSource,

    /// Whether `text` passed validation.
    pub meaningful: bool,

    /// Platform the URL was classified as.
    pub platform: PlatformTag,

    /// Original and canonical URL.
    pub url: ResolvedUrl,

    /// Structured posting found on the page, with or without a description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posting: Option<StructuredPosting>,

    /// Page title and meta description.
    pub page: PageSummary,

    /// Every tier tried, in order.
    pub attempts: Vec<TierAttempt>,
}

impl ExtractionResult {
    /// Whether a tier produced meaningful content.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.meaningful
    }

    /// Return the result only when it is resolved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoContent`] for an unresolved result.
    pub fn into_resolved(self) -> Result<Self> {
        if self.meaningful {
            Ok(self)
        } else {
            Err(Error::NoContent)
        }
    }
}
