//! Error taxonomy for the detection pipeline.
//!
//! The set is closed: every failure a caller can observe is one of these
//! five kinds, each with a stable wire code for the request boundary.

/// All errors the detection pipeline can surface.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Input could not be normalized to an absolute http(s) URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Transport, status, or browser-automation failure.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Markup could not be built into a document tree.
    #[error("failed to parse HTML: {0}")]
    Parse(String),

    /// Zero matches after the fetch mode(s) attempted so far.
    #[error("no login elements found")]
    NoLoginElements,

    /// Unanticipated failure caught at the request boundary.
    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl ScanError {
    /// Stable wire code for the request boundary.
    pub fn code(&self) -> &'static str {
        match self {
            ScanError::InvalidUrl(_) => "INVALID_URL",
            ScanError::Fetch { .. } => "FETCH_ERROR",
            ScanError::Parse(_) => "PARSE_ERROR",
            ScanError::NoLoginElements => "NO_LOGIN_ELEMENTS",
            ScanError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
