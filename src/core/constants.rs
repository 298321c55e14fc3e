/// Application-wide constants to avoid magic values throughout the codebase.
///
/// Markup conventions, engine defaults and the fixed reason strings attached
/// to findings all live here so tests and reporting can refer to them.
/// Output format constants
pub mod output_formats {
    /// Human-readable console output
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 2] = [TEXT, JSON];
}

/// HTTP status code constants
pub mod http_status {
    /// Lowest status treated as reachable (inclusive)
    pub const SUCCESS_MIN: u16 = 200;
    /// First status no longer treated as reachable (exclusive)
    pub const SUCCESS_END: u16 = 400;
    /// HTTP 403 Forbidden - many hosts reject HEAD this way
    pub const FORBIDDEN: u16 = 403;
    /// HTTP 405 Method Not Allowed
    pub const METHOD_NOT_ALLOWED: u16 = 405;

    /// Whether `status` counts as a reachable target.
    pub fn is_reachable(status: u16) -> bool {
        (SUCCESS_MIN..SUCCESS_END).contains(&status)
    }

    /// Whether a HEAD response with `status` should be retried as a ranged GET.
    pub fn wants_get_fallback(status: u16) -> bool {
        status == FORBIDDEN || status == METHOD_NOT_ALLOWED
    }
}

/// Default configuration values
pub mod defaults {
    /// Per-attempt network timeout in seconds
    pub const TIMEOUT_SECONDS: u64 = 10;
    /// Concurrent external checks
    pub const WORKERS: usize = 12;
    /// Attempts per external reference
    pub const RETRIES: u32 = 5;
    /// Base of the exponential backoff, in seconds
    pub const BACKOFF_BASE_SECONDS: f64 = 0.5;
    /// Upper bound (exclusive) of the random jitter added to each backoff, in seconds
    pub const JITTER_MAX_SECONDS: f64 = 0.2;
    /// Component whose `href` attribute is checked
    pub const COMPONENT: &str = "Card";
    /// Config file looked up in the working directory and its parents
    pub const CONFIG_FILE_NAME: &str = ".hrefsup.toml";
}

/// Markup conventions used by extraction and internal resolution
pub mod markup {
    /// Extension of source pages; links ending in it violate publishing policy
    pub const PRIMARY_EXTENSION: &str = "mdx";
    /// Secondary markup extension
    pub const SECONDARY_EXTENSION: &str = "md";
    /// Rendered pages, scanned for tags but never a resolution candidate
    pub const HTML_EXTENSION: &str = "html";
    /// Extensions tried when resolving internal links, in order
    pub const EXTENSIONS: [&str; 2] = [PRIMARY_EXTENSION, SECONDARY_EXTENSION];
    /// Extensions of files scanned by default
    pub const SCAN_EXTENSIONS: [&str; 3] = [PRIMARY_EXTENSION, SECONDARY_EXTENSION, HTML_EXTENSION];
    /// File stem of a directory's index page
    pub const INDEX_STEM: &str = "index";
}

/// Href extraction constants
pub mod extraction {
    /// Radius of the raw-text window searched when recovering line numbers
    pub const LINE_WINDOW_RADIUS: usize = 200;
}

/// Fixed reasons attached to outcomes and findings
pub mod reasons {
    /// Internal reference with no existing candidate path
    pub const FILE_NOT_FOUND: &str = "File not found";
    /// Internal reference that targets a raw source page
    pub const SOURCE_MARKUP_POLICY: &str =
        "points directly to a source markup file; use a published/permalink path";
    /// Outcome for `mailto:` references
    pub const MAILTO: &str = "mailto link";
}
