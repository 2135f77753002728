use std::sync::Arc;

use crate::config::settings::AppConfig;
use crate::infrastructure::mediaconvert::client::MediaConvertService;
use crate::state::AppState;

pub async fn create_state(config: AppConfig) -> AppState {
    let transcoder = MediaConvertService::new(&config).await;
    AppState::new(config, Arc::new(transcoder))
}
