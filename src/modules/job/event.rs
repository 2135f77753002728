//! The S3 object-created notification that triggers a submission.

use aws_lambda_events::event::s3::S3EventRecord;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::common::error::JobError;

pub const URI_SCHEME: &str = "s3";

// Records are kept raw so that only the first one has to be well formed.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Records", default)]
    records: Vec<Value>,
}

/// Bucket and key of the object that was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    pub bucket: String,
    /// Object key exactly as the notification carries it.
    pub key: String,
    pub event_name: Option<String>,
}

impl TriggerEvent {
    /// Reads the first record of a notification. Further records are ignored.
    pub fn from_payload(payload: &Value) -> Result<Self, JobError> {
        let envelope =
            Envelope::deserialize(payload).map_err(|e| JobError::MalformedEvent(e.to_string()))?;

        let first = envelope
            .records
            .first()
            .ok_or_else(|| JobError::MalformedEvent("event carries no records".to_string()))?;

        if envelope.records.len() > 1 {
            warn!(
                records = envelope.records.len(),
                "Event carries several records, only the first one is submitted"
            );
        }

        let record = S3EventRecord::deserialize(first)
            .map_err(|e| JobError::MalformedEvent(format!("Records[0]: {}", e)))?;

        let bucket = present(record.s3.bucket.name, "bucket name")?;
        let key = present(record.s3.object.key, "object key")?;

        Ok(Self {
            bucket,
            key,
            event_name: record.event_name,
        })
    }

    pub fn input_uri(&self) -> String {
        format!("{}://{}/{}", URI_SCHEME, self.bucket, self.key)
    }
}

pub fn output_uri(output_bucket: &str) -> String {
    format!("{}://{}/", URI_SCHEME, output_bucket)
}

fn present(value: Option<String>, what: &str) -> Result<String, JobError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(JobError::MalformedEvent(format!("{} is empty", what))),
        None => Err(JobError::MalformedEvent(format!("{} is missing", what))),
    }
}
