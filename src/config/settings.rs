use std::path::PathBuf;

use tracing::info;
use url::Url;

use crate::common::error::ConfigError;
use crate::config::env::{self, EnvKey};

pub const DEFAULT_REGION: &str = "ap-northeast-1";
pub const DEFAULT_TEMPLATE_PATH: &str = "job.json";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Account-specific MediaConvert endpoint.
    pub endpoint_url: String,
    pub region: String,
    pub output_bucket: String,
    pub job_template_arn: String,
    pub role_arn: String,
    pub queue: String,
    pub template_path: PathBuf,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_lookup(env::get)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(EnvKey) -> Option<String>,
    {
        let endpoint_url = env::required(&lookup, EnvKey::EndpointUrl)?;
        validate_endpoint(&endpoint_url)?;

        let config = Self {
            endpoint_url,
            region: env::get_or(&lookup, EnvKey::Region, DEFAULT_REGION),
            output_bucket: env::required(&lookup, EnvKey::OutputBucket)?,
            job_template_arn: env::required(&lookup, EnvKey::JobTemplateArn)?,
            role_arn: env::required(&lookup, EnvKey::RoleArn)?,
            queue: env::required(&lookup, EnvKey::Queue)?,
            template_path: PathBuf::from(env::get_or(
                &lookup,
                EnvKey::JobTemplatePath,
                DEFAULT_TEMPLATE_PATH,
            )),
        };

        info!(
            endpoint = %config.endpoint_url,
            region = %config.region,
            output_bucket = %config.output_bucket,
            queue = %config.queue,
            "Configuration loaded"
        );

        Ok(config)
    }
}

fn validate_endpoint(value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|source| ConfigError::InvalidEndpoint {
        value: value.to_string(),
        source,
    })?;

    match url.scheme() {
        "https" | "http" => Ok(()),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}
