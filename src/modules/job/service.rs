use serde_json::Value;
use tracing::{debug, error, info, instrument};

use super::dto::{JobHandle, JobRequest};
use super::event::{self, TriggerEvent};
use super::template::JobTemplate;
use crate::common::error::JobError;
use crate::state::AppState;

pub struct JobService;

impl JobService {
    /// Turns one S3 notification into one submitted transcode job.
    pub async fn handle(state: &AppState, payload: &Value) -> Result<JobHandle, JobError> {
        debug!(event = %payload, "Received event");

        let trigger = TriggerEvent::from_payload(payload).inspect_err(|e| {
            error!(error = %e, "Rejected event");
        })?;

        Self::submit(state, &trigger).await.inspect_err(|e| {
            error!(
                bucket = %trigger.bucket,
                key = %trigger.key,
                error = %e,
                "Error getting object {} from bucket {}. Make sure they exist and your bucket is in the same region as this function.",
                trigger.key,
                trigger.bucket
            );
        })
    }

    #[instrument(skip_all, fields(bucket = %trigger.bucket, key = %trigger.key))]
    pub async fn submit(state: &AppState, trigger: &TriggerEvent) -> Result<JobHandle, JobError> {
        let config = &state.config;

        let input_uri = trigger.input_uri();
        let output_uri = event::output_uri(&config.output_bucket);

        let settings = JobTemplate::load(&config.template_path)
            .await?
            .materialize(&input_uri, &output_uri)?;

        let request = JobRequest {
            job_template: config.job_template_arn.clone(),
            queue: config.queue.clone(),
            role: config.role_arn.clone(),
            settings,
        };

        info!(
            event_name = trigger.event_name.as_deref().unwrap_or("unknown"),
            input = %input_uri,
            output = %output_uri,
            "Submitting MediaConvert job"
        );

        let handle = state.transcoder.create_job(request).await?;

        info!(
            job_id = %handle.id,
            status = handle.status.as_deref().unwrap_or("UNKNOWN"),
            "MediaConvert job created"
        );

        Ok(handle)
    }
}
