use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

use super::dto::JobHandle;
use super::service::JobService;
use crate::state::AppState;

/// Lambda entry point. The raw payload is taken as JSON so that a badly shaped
/// notification surfaces as a malformed-event error rather than a runtime decode failure.
pub async fn start_media_convert_job(
    state: &AppState,
    event: LambdaEvent<Value>,
) -> Result<JobHandle, Error> {
    let (payload, context) = event.into_parts();
    info!(request_id = %context.request_id, "Handling S3 notification");

    let handle = JobService::handle(state, &payload).await?;
    Ok(handle)
}
