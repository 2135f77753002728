use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures of a single job submission. Each one is logged with the triggering
/// bucket/key and then returned to the Lambda runtime unchanged.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("malformed event: {0}")]
    MalformedEvent(String),

    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("job template is missing {0}")]
    TemplateShape(String),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),

    #[error("invalid endpoint url '{value}'")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("endpoint url must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("cannot read job template {}", path.display())]
    TemplateUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("job template {} is not valid JSON", path.display())]
    TemplateInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionKind {
    AccessDenied,
    Throttled,
    InvalidReference,
    Service,
    Transport,
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubmissionKind::AccessDenied => "access denied",
            SubmissionKind::Throttled => "request throttled",
            SubmissionKind::InvalidReference => "invalid job reference",
            SubmissionKind::Service => "service error",
            SubmissionKind::Transport => "transport error",
        };
        f.write_str(label)
    }
}

/// A failed CreateJob call. The underlying client error is kept as the source.
#[derive(Debug, Error)]
#[error("job submission failed ({kind}): {source}")]
pub struct SubmissionError {
    pub kind: SubmissionKind,
    #[source]
    pub source: BoxError,
}

impl SubmissionError {
    pub fn new(kind: SubmissionKind, source: impl Into<BoxError>) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }
}
