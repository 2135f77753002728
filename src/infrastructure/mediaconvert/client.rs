use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_mediaconvert::config::retry::RetryConfig;
use aws_sdk_mediaconvert::config::{Builder, Region};
use aws_sdk_mediaconvert::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_mediaconvert::operation::create_job::CreateJobError;
use aws_sdk_mediaconvert::types::JobSettings;
use aws_sdk_mediaconvert::Client;
use aws_smithy_types::body::SdkBody;
use tracing::{info, warn};

use super::wire;
use crate::common::error::{SubmissionError, SubmissionKind};
use crate::config::settings::AppConfig;
use crate::modules::job::dto::{JobHandle, JobRequest};

/// The one capability the submitter needs from the transcoding service.
#[async_trait]
pub trait TranscodeClient: Send + Sync {
    async fn create_job(&self, request: JobRequest) -> Result<JobHandle, SubmissionError>;
}

#[derive(Clone)]
pub struct MediaConvertService {
    client: Client,
}

impl MediaConvertService {
    pub async fn new(config: &AppConfig) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let sdk_config = Builder::from(&shared)
            .endpoint_url(&config.endpoint_url)
            .retry_config(RetryConfig::disabled())
            .build();

        info!(
            endpoint = %config.endpoint_url,
            region = %config.region,
            "MediaConvert client ready"
        );

        Self::from_client(Client::from_conf(sdk_config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TranscodeClient for MediaConvertService {
    async fn create_job(&self, request: JobRequest) -> Result<JobHandle, SubmissionError> {
        // The settings document goes out as-is; the typed builder only satisfies the
        // required members before the body is swapped.
        // Only fails for non-string map keys, which a parsed document cannot hold.
        let body = wire::create_job_body(&request)
            .map_err(|e| SubmissionError::new(SubmissionKind::Service, e))?;

        let output = self
            .client
            .create_job()
            .job_template(&request.job_template)
            .queue(&request.queue)
            .role(&request.role)
            .settings(JobSettings::builder().build())
            .customize()
            .mutate_request(move |req| {
                req.headers_mut()
                    .insert("content-length", body.len().to_string());
                *req.body_mut() = SdkBody::from(body.clone());
            })
            .send()
            .await
            .map_err(classify)?;

        let job = output.job().ok_or_else(|| {
            SubmissionError::new(SubmissionKind::Service, "CreateJob response carried no job")
        })?;

        let id = job.id().map(str::to_string).ok_or_else(|| {
            SubmissionError::new(SubmissionKind::Service, "CreateJob response carried no job id")
        })?;

        Ok(JobHandle {
            id,
            arn: job.arn().map(str::to_string),
            status: job.status().map(|s| s.as_str().to_string()),
        })
    }
}

fn classify<R>(err: SdkError<CreateJobError, R>) -> SubmissionError
where
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let kind = match &err {
        SdkError::ServiceError(service) => match service.err() {
            CreateJobError::ForbiddenException(_) => SubmissionKind::AccessDenied,
            CreateJobError::TooManyRequestsException(_) => SubmissionKind::Throttled,
            CreateJobError::BadRequestException(_) | CreateJobError::NotFoundException(_) => {
                SubmissionKind::InvalidReference
            }
            other => kind_from_code(other.code()),
        },
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            SubmissionKind::Transport
        }
        _ => SubmissionKind::Service,
    };

    warn!(%kind, error = %DisplayErrorContext(&err), "CreateJob call failed");

    SubmissionError::new(kind, aws_sdk_mediaconvert::Error::from(err))
}

fn kind_from_code(code: Option<&str>) -> SubmissionKind {
    match code {
        Some(c) if c.starts_with("AccessDenied") || c == "UnrecognizedClientException" => {
            SubmissionKind::AccessDenied
        }
        Some(c) if c.starts_with("Throttl") => SubmissionKind::Throttled,
        _ => SubmissionKind::Service,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_mediaconvert::config::Credentials;
    use aws_smithy_http_client::test_util::{CaptureRequestReceiver, capture_request};
    use serde_json::{Value, json};

    const ENDPOINT: &str = "https://abcd1234.mediaconvert.ap-northeast-1.amazonaws.com";

    fn service_answering(
        status: u16,
        headers: &[(&str, &str)],
        body: &str,
    ) -> (MediaConvertService, CaptureRequestReceiver) {
        let mut response = http::Response::builder().status(status);
        for (name, value) in headers {
            response = response.header(*name, *value);
        }
        let response = response.body(SdkBody::from(body.to_string())).unwrap();

        let (http_client, captured) = capture_request(Some(response));

        let config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("ap-northeast-1"))
            .endpoint_url(ENDPOINT)
            .credentials_provider(Credentials::new("AKIDEXAMPLE", "secret", None, None, "static"))
            .retry_config(RetryConfig::disabled())
            .http_client(http_client)
            .build();

        (MediaConvertService::from_client(Client::from_conf(config)), captured)
    }

    fn request() -> JobRequest {
        JobRequest {
            job_template: "arn:aws:mediaconvert:ap-northeast-1:123456789012:jobTemplates/hls".into(),
            queue: "arn:aws:mediaconvert:ap-northeast-1:123456789012:queues/Default".into(),
            role: "arn:aws:iam::123456789012:role/MediaConvertRole".into(),
            settings: json!({
                "Inputs": [{
                    "FileInput": "s3://incoming-media/clip1.mp4",
                    "AudioSelectors": { "Audio Selector 1": { "DefaultSelection": "DEFAULT" } }
                }]
            }),
        }
    }

    fn forbidden() -> (u16, Vec<(&'static str, &'static str)>, &'static str) {
        (
            403,
            vec![
                ("content-type", "application/json"),
                ("x-amzn-errortype", "ForbiddenException"),
            ],
            r#"{"message":"User is not authorized to perform: mediaconvert:CreateJob"}"#,
        )
    }

    #[tokio::test]
    async fn sends_settings_verbatim_in_wire_casing() {
        let (service, captured) = service_answering(
            201,
            &[("content-type", "application/json")],
            r#"{"job":{"id":"1700000000000-abc123","arn":"arn:aws:mediaconvert:ap-northeast-1:123456789012:jobs/1700000000000-abc123","status":"SUBMITTED","role":"arn:aws:iam::123456789012:role/MediaConvertRole","settings":{}}}"#,
        );

        let handle = service.create_job(request()).await.unwrap();

        assert_eq!(
            handle,
            JobHandle {
                id: "1700000000000-abc123".to_string(),
                arn: Some(
                    "arn:aws:mediaconvert:ap-northeast-1:123456789012:jobs/1700000000000-abc123"
                        .to_string()
                ),
                status: Some("SUBMITTED".to_string()),
            }
        );

        let sent = captured.expect_request();
        assert!(sent.uri().ends_with("/2017-08-29/jobs"), "{}", sent.uri());
        assert!(
            sent.headers()
                .get("authorization")
                .is_some_and(|v| v.starts_with("AWS4-HMAC-SHA256"))
        );

        let bytes = sent.body().bytes().unwrap();
        let expected_length = bytes.len().to_string();
        assert_eq!(
            sent.headers().get("content-length"),
            Some(expected_length.as_str())
        );

        let body: Value = serde_json::from_slice(bytes).unwrap();
        assert_eq!(
            body["jobTemplate"],
            "arn:aws:mediaconvert:ap-northeast-1:123456789012:jobTemplates/hls"
        );
        assert_eq!(body["role"], "arn:aws:iam::123456789012:role/MediaConvertRole");
        assert_eq!(
            body["settings"]["inputs"][0]["fileInput"],
            "s3://incoming-media/clip1.mp4"
        );
        assert_eq!(
            body["settings"]["inputs"][0]["audioSelectors"]["Audio Selector 1"]["defaultSelection"],
            "DEFAULT"
        );
    }

    #[tokio::test]
    async fn forbidden_is_access_denied_with_sdk_cause() {
        let (status, headers, body) = forbidden();
        let (service, _captured) = service_answering(status, &headers, body);

        let err = service.create_job(request()).await.unwrap_err();

        assert_eq!(err.kind, SubmissionKind::AccessDenied);
        let cause = err
            .source
            .downcast_ref::<aws_sdk_mediaconvert::Error>()
            .expect("SDK error kept as the cause");
        assert!(matches!(cause, aws_sdk_mediaconvert::Error::ForbiddenException(_)));
    }

    #[tokio::test]
    async fn too_many_requests_is_throttled() {
        let (service, _captured) = service_answering(
            429,
            &[
                ("content-type", "application/json"),
                ("x-amzn-errortype", "TooManyRequestsException"),
            ],
            r#"{"message":"Too many requests"}"#,
        );

        let err = service.create_job(request()).await.unwrap_err();
        assert_eq!(err.kind, SubmissionKind::Throttled);
    }

    #[tokio::test]
    async fn unknown_template_is_an_invalid_reference() {
        let (service, _captured) = service_answering(
            400,
            &[
                ("content-type", "application/json"),
                ("x-amzn-errortype", "BadRequestException"),
            ],
            r#"{"message":"Job template not found"}"#,
        );

        let err = service.create_job(request()).await.unwrap_err();
        assert_eq!(err.kind, SubmissionKind::InvalidReference);
    }

    #[test]
    fn unmodelled_error_codes_are_classified() {
        assert_eq!(
            kind_from_code(Some("AccessDeniedException")),
            SubmissionKind::AccessDenied
        );
        assert_eq!(
            kind_from_code(Some("ThrottlingException")),
            SubmissionKind::Throttled
        );
        assert_eq!(
            kind_from_code(Some("InternalServerErrorException")),
            SubmissionKind::Service
        );
        assert_eq!(kind_from_code(None), SubmissionKind::Service);
    }
}
