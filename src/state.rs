use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::infrastructure::mediaconvert::client::TranscodeClient;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub transcoder: Arc<dyn TranscodeClient>,
}

impl AppState {
    pub fn new(config: AppConfig, transcoder: Arc<dyn TranscodeClient>) -> Self {
        Self { config, transcoder }
    }
}
