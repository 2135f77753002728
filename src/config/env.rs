use std::env;

use crate::common::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvKey {
    EndpointUrl,
    OutputBucket,
    JobTemplateArn,
    RoleArn,
    Queue,
    Region,
    JobTemplatePath,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::EndpointUrl => "ENDPOINT_URL",
            EnvKey::OutputBucket => "OUTPUT_BUCKET",
            EnvKey::JobTemplateArn => "MEDIA_CONVERT_JOB_TEMPLATE_ARN",
            EnvKey::RoleArn => "MEDIA_CONVERT_ROLE_ARN",
            EnvKey::Queue => "MEDIA_CONVERT_QUE",
            EnvKey::Region => "AWS_REGION",
            EnvKey::JobTemplatePath => "JOB_TEMPLATE_PATH",
        }
    }
}

/// Reads a variable from the process environment. Empty values are treated as unset.
pub fn get(key: EnvKey) -> Option<String> {
    env::var(key.as_str()).ok().filter(|val| !val.trim().is_empty())
}

pub fn required<F>(lookup: &F, key: EnvKey) -> Result<String, ConfigError>
where
    F: Fn(EnvKey) -> Option<String>,
{
    lookup(key).ok_or(ConfigError::MissingVar(key.as_str()))
}

pub fn get_or<F>(lookup: &F, key: EnvKey, default: &str) -> String
where
    F: Fn(EnvKey) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}
