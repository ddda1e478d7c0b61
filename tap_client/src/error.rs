//! Error types for TAP client operations.

use crate::tap::JobPhase;

/// Result type for TAP client operations
pub type TapResult<T> = Result<T, TapError>;

/// Error type for TAP client operations
#[derive(Debug, thiserror::Error)]
pub enum TapError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Job submission returned no Location header (HTTP {status})")]
    MissingLocation { status: u16 },

    #[error("Job has not been submitted")]
    NotSubmitted,

    #[error("XML error: {0}")]
    Xml(String),

    #[error("VOTable parse error: {message}")]
    VoTable {
        message: String,
        /// Raw response body, kept for inspection
        raw: String,
    },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error("Job {job_id} ended in phase {phase}{}", detail_suffix(.message))]
    JobFailed {
        job_id: String,
        phase: JobPhase,
        message: Option<String>,
    },

    #[error("SQL formatter error: {0}")]
    Formatter(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn detail_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {}", m),
        None => String::new(),
    }
}

impl TapError {
    /// Raw server response attached to a VOTable parse failure, if any.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            TapError::VoTable { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for TapError {
    fn from(e: quick_xml::Error) -> Self {
        TapError::Xml(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_failed_message() {
        let err = TapError::JobFailed {
            job_id: "1612".to_string(),
            phase: JobPhase::Error,
            message: Some("syntax error".to_string()),
        };
        assert_eq!(err.to_string(), "Job 1612 ended in phase ERROR: syntax error");

        let err = TapError::JobFailed {
            job_id: "1612".to_string(),
            phase: JobPhase::Aborted,
            message: None,
        };
        assert_eq!(err.to_string(), "Job 1612 ended in phase ABORTED");
    }

    #[test]
    fn test_raw_response_only_for_votable_errors() {
        let err = TapError::VoTable {
            message: "no TABLE element".to_string(),
            raw: "<html>oops</html>".to_string(),
        };
        assert_eq!(err.raw_response(), Some("<html>oops</html>"));
        assert_eq!(TapError::NotSubmitted.raw_response(), None);
    }
}
