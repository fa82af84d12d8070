//! # job-extract
//!
//! Job posting content resolution for pages served by recruiting platforms.
//!
//! Given the HTML of a job page and the URL it came from, this library
//! produces clean job text suitable for downstream analysis, together with
//! where that text came from. Extraction runs in tiers, and the first tier
//! that yields meaningful job content wins:
//!
//! 1. **Structured data**: the description of a Schema.org `JobPosting`
//!    embedded as JSON-LD
//! 2. **Cleaned text**: the page with navigation, banners and legal
//!    boilerplate stripped
//! 3. **Fallback**: readability extraction over a pre-cleaned page
//!
//! Before any of that, the URL is classified (Greenhouse, Lever, Workday or
//! generic) and rewritten to the canonical URL the platform itself serves.
//!
//! ## Quick Start
//!
//! ```rust
//! use job_extract::{extract_job, ContentSource, PlatformTag};
//!
//! let html = r#"<html><body>
//!   <nav class="main-nav">Home | Careers</nav>
//!   <main>
//!     <h1>Senior Software Engineer</h1>
//!     <p>Join the platform team to design and operate the services behind our
//!     checkout flow. Responsibilities include owning APIs end to end, improving
//!     reliability and mentoring engineers.</p>
//!     <p>Requirements: five years of experience with distributed systems, strong
//!     skills in Rust or Go, and care for operational excellence.</p>
//!   </main>
//! </body></html>"#;
//!
//! let result = extract_job(html, "https://careers.acme.com/jobs?gh_jid=12345");
//! assert_eq!(result.platform, PlatformTag::Greenhouse);
//! assert_eq!(result.source, ContentSource::Cleaned);
//! assert!(result.meaningful);
//! assert!(result.text.contains("Senior Software Engineer"));
//! ```
//!
//! ## Logging
//!
//! Stage decisions are emitted as `tracing` events. The library never
//! installs a subscriber.

mod error;
mod options;
mod patterns;
mod result;

/// DOM helpers over `dom_query`: block-aware text serialization and node removal.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// URL utilities for lenient parsing and job URL validation.
pub mod url_utils;

/// Platform classification and URL canonicalization.
pub mod platform;

/// JSON-LD `JobPosting` extraction.
pub mod structured;

/// Boilerplate stripping and legal-text suppression.
pub mod cleaner;

/// Readability fallback extraction.
pub mod fallback;

/// Job content validation.
pub mod validator;

/// Tier orchestration, fetch-driven runs and batch extraction.
pub mod pipeline;

// Public API - re-exports
pub use cleaner::{strip, strip_with_options, CleanedText};
pub use error::{Error, Result};
pub use fallback::{extract_fallback, extract_fallback_with_options};
pub use options::{FallbackOptions, Options};
pub use pipeline::{FetchOutcome, Fetcher, JobExtractor, Page};
pub use platform::{api_endpoint, canonicalize, classify, PlatformTag, ResolvedUrl};
pub use result::{ContentSource, ExtractionResult, TierAttempt};
pub use structured::{extract_structured, page_summary, PageSummary, StructuredPosting};
pub use url_utils::validate_job_url;
pub use validator::{assess, is_meaningful, Assessment};

/// Extract job content from a page using default options.
///
/// Never fails. Check [`ExtractionResult::meaningful`] to see whether any
/// tier produced job content.
#[must_use]
pub fn extract_job(html: &str, url: &str) -> ExtractionResult {
    JobExtractor::default().extract(html, url)
}

/// Extract job content from a page using custom options.
#[must_use]
pub fn extract_job_with_options(html: &str, url: &str, options: &Options) -> ExtractionResult {
    JobExtractor::new(options.clone()).extract(html, url)
}
