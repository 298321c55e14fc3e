use std::fmt;

/// Error types for hrefsup setup and I/O.
///
/// Link failures are never errors: they become `BrokenLinkRecord`s. This enum
/// only covers what can stop a run before checking starts (bad config, an
/// unusable HTTP client, an unreadable root) and transport failures raised by
/// a `Transport` during a single attempt.
#[derive(Debug)]
pub enum HrefsUpError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// Transport-level failure for a single request attempt
    Network(String),

    /// Regex compilation error
    Regex(regex::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// File not found error
    FileNotFound(String),

    /// File walking/ignore error
    FileWalking(ignore::Error),
}

impl fmt::Display for HrefsUpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HrefsUpError::Io(err) => write!(f, "IO error: {err}"),
            HrefsUpError::Config(msg) => write!(f, "Configuration error: {msg}"),
            HrefsUpError::Http(err) => write!(f, "HTTP error: {err}"),
            HrefsUpError::Network(msg) => write!(f, "Network error: {msg}"),
            HrefsUpError::Regex(err) => write!(f, "Regex error: {err}"),
            HrefsUpError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            HrefsUpError::FileNotFound(path) => write!(f, "File not found: {path}"),
            HrefsUpError::FileWalking(err) => write!(f, "File walking error: {err}"),
        }
    }
}

impl std::error::Error for HrefsUpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HrefsUpError::Io(err) => Some(err),
            HrefsUpError::Http(err) => Some(err),
            HrefsUpError::Regex(err) => Some(err),
            HrefsUpError::TomlParsing(err) => Some(err),
            HrefsUpError::FileWalking(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HrefsUpError {
    fn from(err: std::io::Error) -> Self {
        HrefsUpError::Io(err)
    }
}

impl From<reqwest::Error> for HrefsUpError {
    fn from(err: reqwest::Error) -> Self {
        HrefsUpError::Http(err)
    }
}

impl From<regex::Error> for HrefsUpError {
    fn from(err: regex::Error) -> Self {
        HrefsUpError::Regex(err)
    }
}

impl From<toml::de::Error> for HrefsUpError {
    fn from(err: toml::de::Error) -> Self {
        HrefsUpError::TomlParsing(err)
    }
}

impl From<ignore::Error> for HrefsUpError {
    fn from(err: ignore::Error) -> Self {
        HrefsUpError::FileWalking(err)
    }
}

/// Type alias for Results using HrefsUpError
pub type Result<T> = std::result::Result<T, HrefsUpError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let config_error = HrefsUpError::Config("Invalid timeout".to_string());
        assert_eq!(
            format!("{config_error}"),
            "Configuration error: Invalid timeout"
        );

        let file_error = HrefsUpError::FileNotFound("/path/to/root".to_string());
        assert_eq!(format!("{file_error}"), "File not found: /path/to/root");

        let network_error = HrefsUpError::Network("connection refused".to_string());
        assert_eq!(
            format!("{network_error}"),
            "Network error: connection refused"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let converted = HrefsUpError::from(io_error);

        assert!(matches!(converted, HrefsUpError::Io(_)));
        assert!(converted.source().is_some());
    }

    #[test]
    fn test_error_from_reqwest() {
        let reqwest_error = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        let converted = HrefsUpError::from(reqwest_error);

        assert!(matches!(converted, HrefsUpError::Http(_)));
        assert!(format!("{converted}").starts_with("HTTP error:"));
    }

    #[test]
    #[allow(clippy::invalid_regex)]
    fn test_error_from_regex() {
        let regex_error = regex::Regex::new("[invalid").unwrap_err();
        let converted = HrefsUpError::from(regex_error);

        assert!(matches!(converted, HrefsUpError::Regex(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_error = toml::from_str::<toml::Value>("invalid toml [").unwrap_err();
        let converted = HrefsUpError::from(toml_error);

        assert!(matches!(converted, HrefsUpError::TomlParsing(_)));
        assert!(format!("{converted}").contains("TOML parsing error:"));
    }

    #[test]
    fn test_error_from_ignore() {
        let ignore_error = ignore::WalkBuilder::new("/definitely/nonexistent/path/12345")
            .build()
            .next()
            .unwrap()
            .unwrap_err();
        let converted = HrefsUpError::from(ignore_error);

        assert!(matches!(converted, HrefsUpError::FileWalking(_)));
        assert!(converted.source().is_some());
    }

    #[test]
    fn test_error_no_source_variants() {
        let errors_without_source = vec![
            HrefsUpError::Config("test".to_string()),
            HrefsUpError::Network("test".to_string()),
            HrefsUpError::FileNotFound("test".to_string()),
        ];

        for error in errors_without_source {
            assert!(error.source().is_none());
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HrefsUpError>();
    }
}
