use serde::Serialize;
use serde_json::Value;

/// Everything a CreateJob call needs. `settings` is the patched template document.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRequest {
    pub job_template: String,
    pub queue: String,
    pub role: String,
    pub settings: Value,
}

/// What the transcoding service hands back for an accepted job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobHandle {
    pub id: String,
    pub arn: Option<String>,
    pub status: Option<String>,
}
