use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{CommitMode, Config, DEFAULT_MAX_UPLOAD_BYTES};
use crate::utils::jwt::JwtManager;

/// Settings the router needs at request time, detached from the global
/// `APP_CONFIG` so the app can be built in tests.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub swagger_enabled: bool,
    pub cors_allowed_origins: String,
    pub marks_commit_mode: CommitMode,
    pub max_upload_bytes: usize,
    pub app_env: String,
}

impl AppSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            swagger_enabled: config.swagger_enabled,
            cors_allowed_origins: config.cors_allowed_origins.clone(),
            marks_commit_mode: config.marks_commit_mode,
            max_upload_bytes: config.max_upload_bytes,
            app_env: config.app_env.clone(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            swagger_enabled: false,
            cors_allowed_origins: "*".to_string(),
            marks_commit_mode: CommitMode::Batch,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            app_env: "local".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt: JwtManager,
    pub settings: Arc<AppSettings>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, jwt: JwtManager, settings: AppSettings) -> Self {
        Self {
            db,
            jwt,
            settings: Arc::new(settings),
        }
    }
}
