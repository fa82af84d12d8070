//! Pipeline Orchestration
//!
//! Sequences the extraction tiers for one page:
//!
//! ```text
//! classify -> canonicalize -> [fetch] -> structured -> cleaned -> fallback
//! ```
//!
//! The first tier with meaningful output terminates the run. When none
//! does, the result is unresolved and carries the longest text produced.
//! Runs share no state, so independent pages can be processed in parallel.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::cleaner;
use crate::dom;
use crate::encoding;
use crate::error::{Error, Result};
use crate::fallback;
use crate::options::Options;
use crate::platform::{self, PlatformTag, ResolvedUrl};
use crate::result::{ContentSource, ExtractionResult, TierAttempt};
use crate::structured::{self, PageSummary, StructuredPosting};
use crate::validator;

/// What the fetch collaborator reports for one request.
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub success: bool,
    /// Response body, empty on failure.
    pub html: String,
    pub status_code: Option<u16>,
    pub error_message: Option<String>,
    /// URL after redirects, when the fetcher tracks it.
    pub final_url: Option<String>,
}

/// Source of page HTML for [`JobExtractor::run`].
///
/// Implementations own all network concerns: timeouts, retries and headers.
pub trait Fetcher {
    /// Fetch a page.
    fn fetch(&self, url: &str) -> FetchOutcome;
}

/// An already fetched page, for batch extraction.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub url: String,
    pub html: String,
}

impl Page {
    /// Create a page from a URL and its HTML.
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

/// Tiered job content extractor.
///
/// # Example
///
/// ```rust
/// use job_extract::{ContentSource, JobExtractor, Options};
///
/// let extractor = JobExtractor::new(Options::default());
/// let html = r#"<script type="application/ld+json">
///   {"@type": "JobPosting", "title": "SRE", "description": "<p>Keep production healthy.</p>"}
/// </script>"#;
///
/// let result = extractor.extract(html, "https://jobs.lever.co/acme/123");
/// assert_eq!(result.source, ContentSource::Structured);
/// assert_eq!(result.text, "Keep production healthy.");
/// ```
#[derive(Debug, Clone, Default)]
pub struct JobExtractor {
    options: Options,
}

impl JobExtractor {
    /// Create an extractor with the given options.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Options this extractor runs with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Classify a URL and resolve its canonical form.
    #[must_use]
    pub fn resolve(&self, url: &str) -> (PlatformTag, ResolvedUrl) {
        let platform = platform::classify(url);
        (platform, platform::canonicalize(url, platform))
    }

    /// Extract job content from a page already fetched from `url`.
    #[must_use]
    pub fn extract(&self, html: &str, url: &str) -> ExtractionResult {
        let (platform, resolved) = self.resolve(url);
        let hint = resolved.canonical.clone();
        self.extract_resolved(html, platform, resolved, &hint)
    }

    /// Extract job content from raw page bytes in any declared charset.
    #[must_use]
    pub fn extract_bytes(&self, bytes: &[u8], url: &str) -> ExtractionResult {
        let html = encoding::transcode_to_utf8(bytes);
        self.extract(&html, url)
    }

    /// Resolve, fetch and extract a job page.
    ///
    /// The canonical URL is fetched. The fetcher's final URL, when given,
    /// is used as the readability base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] when the fetcher reports a failure.
    pub fn run<F: Fetcher + ?Sized>(&self, url: &str, fetcher: &F) -> Result<ExtractionResult> {
        let (platform, resolved) = self.resolve(url);

        let outcome = fetcher.fetch(&resolved.canonical);
        if !outcome.success {
            warn!(url = %resolved.canonical, status = ?outcome.status_code, "fetch failed");
            return Err(Error::Fetch {
                url: resolved.canonical,
                status: outcome.status_code,
                message: outcome
                    .error_message
                    .unwrap_or_else(|| "fetch failed".to_string()),
            });
        }

        let hint = outcome
            .final_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| resolved.canonical.clone());
        Ok(self.extract_resolved(&outcome.html, platform, resolved, &hint))
    }

    /// Extract many pages in parallel. Results keep the input order.
    #[must_use]
    pub fn extract_batch(&self, pages: &[Page]) -> Vec<ExtractionResult> {
        pages
            .par_iter()
            .map(|page| self.extract(&page.html, &page.url))
            .collect()
    }

    fn extract_resolved(
        &self,
        html: &str,
        platform: PlatformTag,
        resolved: ResolvedUrl,
        hint: &str,
    ) -> ExtractionResult {
        let (page, posting) = {
            let doc = dom::parse(html);
            (
                structured::page_summary_from(&doc),
                structured::extract_structured_from(&doc),
            )
        };

        let mut run = TierRun::new(platform, resolved, posting, page);

        let structured_text = run
            .posting
            .as_ref()
            .map(StructuredPosting::description_text)
            .unwrap_or_default();
        if !structured_text.is_empty() {
            return run.finish(ContentSource::Structured, structured_text, true);
        }

        let cleaned = cleaner::strip_with_options(html, &self.options).into_string();
        let verdict = validator::assess(&cleaned, &self.options);
        if verdict.meaningful {
            return run.finish(ContentSource::Cleaned, cleaned, true);
        }
        run.record(ContentSource::Cleaned, cleaned, false);

        if self.options.use_readability_fallback {
            let text =
                fallback::extract_fallback_with_options(html, Some(hint), &self.options.fallback);
            let verdict = validator::assess(&text, &self.options);
            if verdict.meaningful {
                return run.finish(ContentSource::Fallback, text, true);
            }
            run.record(ContentSource::Fallback, text, false);
        } else {
            debug!("readability fallback disabled");
        }

        run.unresolved()
    }
}

/// Bookkeeping for one pipeline run.
struct TierRun {
    platform: PlatformTag,
    url: ResolvedUrl,
    posting: Option<StructuredPosting>,
    page: PageSummary,
    attempts: Vec<TierAttempt>,
    /// Longest rejected text so far; ties keep the earlier tier.
    longest: Option<(ContentSource, String)>,
}

impl TierRun {
    fn new(
        platform: PlatformTag,
        url: ResolvedUrl,
        posting: Option<StructuredPosting>,
        page: PageSummary,
    ) -> Self {
        Self {
            platform,
            url,
            posting,
            page,
            attempts: Vec::new(),
            longest: None,
        }
    }

    fn record(&mut self, source: ContentSource, text: String, meaningful: bool) {
        let chars = text.chars().count();
        debug!(tier = source.as_str(), chars, meaningful, "tier finished");
        self.attempts.push(TierAttempt {
            source,
            chars,
            meaningful,
        });

        let longer = match &self.longest {
            Some((_, best)) => chars > best.chars().count(),
            None => true,
        };
        if longer {
            self.longest = Some((source, text));
        }
    }

    fn finish(mut self, source: ContentSource, text: String, meaningful: bool) -> ExtractionResult {
        let chars = text.chars().count();
        self.attempts.push(TierAttempt {
            source,
            chars,
            meaningful,
        });
        info!(
            platform = self.platform.as_str(),
            tier = source.as_str(),
            chars,
            meaningful,
            "extraction finished"
        );
        self.into_result(source, text, meaningful)
    }

    fn unresolved(mut self) -> ExtractionResult {
        let (source, text) = self
            .longest
            .take()
            .unwrap_or((ContentSource::Cleaned, String::new()));
        info!(
            platform = self.platform.as_str(),
            tier = source.as_str(),
            chars = text.chars().count(),
            "no tier produced meaningful content"
        );
        self.into_result(source, text, false)
    }

    fn into_result(self, source: ContentSource, text: String, meaningful: bool) -> ExtractionResult {
        ExtractionResult {
            text,
            source,
            meaningful,
            platform: self.platform,
            url: self.url,
            posting: self.posting,
            page: self.page,
            attempts: self.attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_JOB: &str = r#"<html><head><title>Backend Engineer</title></head><body>
        <nav class="site-nav">Jobs | Teams | Login</nav>
        <main>
            <h1>Backend Engineer</h1>
            <h2>Responsibilities:</h2>
            <p>Design, build and operate the services behind our payments platform, working closely with product and infrastructure.</p>
            <h2>Requirements:</h2>
            <p>Several years of experience building reliable distributed systems, and a habit of writing clear, tested code.</p>
        </main>
    </body></html>"#;

    #[test]
    fn test_structured_tier_wins() {
        let html = r#"<script type="application/ld+json">{"@type": "JobPosting", "title": "SRE", "description": "Keep production healthy."}</script>"#;
        let result = JobExtractor::default().extract(html, "https://boards.greenhouse.io/acme/jobs/1");

        assert_eq!(result.source, ContentSource::Structured);
        assert!(result.meaningful);
        assert_eq!(result.text, "Keep production healthy.");
        assert_eq!(result.platform, PlatformTag::Greenhouse);
        assert_eq!(result.attempts.len(), 1);
    }

    #[test]
    fn test_posting_without_description_continues() {
        let html = LONG_JOB.replace(
            "</head>",
            r#"<script type="application/ld+json">{"@type": "JobPosting", "title": "Backend Engineer", "hiringOrganization": "Acme"}</script></head>"#,
        );
        let result = JobExtractor::default().extract(&html, "https://acme.com/careers/1");

        assert_eq!(result.source, ContentSource::Cleaned);
        assert!(result.meaningful);
        assert_eq!(
            result.posting.and_then(|p| p.company),
            Some("Acme".to_string())
        );
    }

    #[test]
    fn test_cleaned_tier() {
        let result = JobExtractor::default().extract(LONG_JOB, "https://acme.com/careers/1");

        assert_eq!(result.source, ContentSource::Cleaned);
        assert!(result.meaningful);
        assert!(result.text.contains("payments platform"));
        assert!(!result.text.contains("Login"));
        assert_eq!(result.page.title.as_deref(), Some("Backend Engineer"));
    }

    #[test]
    fn test_unresolved_without_fallback() {
        let options = Options {
            use_readability_fallback: false,
            ..Options::default()
        };
        let result = JobExtractor::new(options).extract("<p>Short page</p>", "https://acme.com");

        assert!(!result.meaningful);
        assert!(!result.is_resolved());
        assert_eq!(result.source, ContentSource::Cleaned);
        assert_eq!(result.text, "Short page");
        assert_eq!(result.attempts.len(), 1);
        assert!(matches!(result.into_resolved(), Err(Error::NoContent)));
    }

    #[test]
    fn test_fallback_attempted_on_near_empty_page() {
        let result = JobExtractor::default().extract("<html><body><p>Hi</p></body></html>", "");

        assert!(!result.meaningful);
        let sources: Vec<ContentSource> = result.attempts.iter().map(|a| a.source).collect();
        assert_eq!(sources, vec![ContentSource::Cleaned, ContentSource::Fallback]);
    }

    struct StaticFetcher {
        outcome: FetchOutcome,
    }

    impl Fetcher for StaticFetcher {
        fn fetch(&self, _url: &str) -> FetchOutcome {
            self.outcome.clone()
        }
    }

    #[test]
    fn test_run_maps_fetch_failure() {
        let fetcher = StaticFetcher {
            outcome: FetchOutcome {
                status_code: Some(404),
                error_message: Some("HTTP 404".to_string()),
                ..FetchOutcome::default()
            },
        };
        let err = JobExtractor::default()
            .run("https://careers.acme.com/jobs?gh_jid=12345", &fetcher)
            .unwrap_err();

        match err {
            Error::Fetch { url, status, message } => {
                assert_eq!(url, "https://boards.greenhouse.io/embed/job_app?token=12345");
                assert_eq!(status, Some(404));
                assert_eq!(message, "HTTP 404");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_extracts_fetched_page() {
        let fetcher = StaticFetcher {
            outcome: FetchOutcome {
                success: true,
                html: LONG_JOB.to_string(),
                status_code: Some(200),
                ..FetchOutcome::default()
            },
        };
        let result = JobExtractor::default()
            .run("https://acme.com/careers/1", &fetcher)
            .expect("extraction");
        assert_eq!(result.source, ContentSource::Cleaned);
        assert_eq!(result.url.canonical, "https://acme.com/careers/1");
    }
}
