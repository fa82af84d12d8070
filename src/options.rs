//! Configuration options for job content resolution.
//!
//! The `Options` struct controls the validator gate, the legal-section
//! suppression heuristic and the readability fallback tier.

/// Configuration options for the extraction pipeline.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use job_extract::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     min_length: 400,
///     use_readability_fallback: false,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Minimum character count for text to be considered meaningful.
    ///
    /// Default: `200`
    pub min_length: usize,

    /// Minimum number of distinct job vocabulary terms a meaningful text
    /// must contain.
    ///
    /// Default: `2`
    pub min_keyword_matches: usize,

    /// A legal line shorter than this (in characters) is treated as a section
    /// header: every following line is suppressed until a new section starts.
    ///
    /// Default: `100`
    pub legal_header_max_len: usize,

    /// A line shorter than this (in characters) may end a suppressed legal
    /// section.
    ///
    /// Default: `60`
    pub section_resume_max_len: usize,

    /// Require the section-resuming line to end with a colon.
    ///
    /// With this disabled, any short line resumes content, which trades
    /// legal-text leakage for fewer false suppressions.
    ///
    /// Default: `true`
    pub section_resume_requires_colon: bool,

    /// Run the readability fallback tier when the cleaned text is rejected.
    ///
    /// Default: `true`
    pub use_readability_fallback: bool,

    /// Behaviour of the readability fallback tier.
    pub fallback: FallbackOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_length: 200,
            min_keyword_matches: 2,
            legal_header_max_len: 100,
            section_resume_max_len: 60,
            section_resume_requires_colon: true,
            use_readability_fallback: true,
            fallback: FallbackOptions::default(),
        }
    }
}

/// Configuration of the readability fallback extractor.
///
/// The defaults favor precision over recall: user comments, links and
/// images are excluded, tables are kept because they often carry salary
/// or location details, and repeated blocks are emitted once.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct FallbackOptions {
    /// Prune boilerplate subtrees before running readability.
    ///
    /// Default: `true`
    pub favor_precision: bool,

    /// Keep comment sections.
    ///
    /// Default: `false`
    pub include_comments: bool,

    /// Keep table content.
    ///
    /// Default: `true`
    pub include_tables: bool,

    /// Keep link URLs next to their anchor text.
    ///
    /// Default: `false`
    pub include_links: bool,

    /// Keep image alt text as content lines.
    ///
    /// Default: `false`
    pub include_images: bool,

    /// Emit each distinct text block only once.
    ///
    /// Default: `true`
    pub deduplicate: bool,

    /// Upper bound on elements readability will score (`0` = unlimited).
    ///
    /// Default: `0`
    pub max_elements_to_parse: usize,
}

impl Default for FallbackOptions {
    fn default() -> Self {
        Self {
            favor_precision: true,
            include_comments: false,
            include_tables: true,
            include_links: false,
            include_images: false,
            deduplicate: true,
            max_elements_to_parse: 0,
        }
    }
}
