use clap::{Parser, ValueEnum};
use once_cell::sync::Lazy;
use serde::Serialize;

pub const JWT_EXPRIED_TIME: i64 = 86400i64;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

/// How an internal-marks upload is committed.
///
/// `Batch` keeps the whole upload in one transaction and gives every row its
/// own savepoint, so a storage failure at commit loses the entire batch.
/// `PerRow` commits each applied row on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitMode {
    #[default]
    Batch,
    PerRow,
}

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env, default_value = "sqlite://eduverse.db?mode=rwc")]
    pub database_url: String,

    #[clap(long, env)]
    pub jwt_secret: String,

    #[clap(long, env)]
    pub admin_email: String,

    #[clap(long, env)]
    pub admin_password: String,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, value_enum, default_value_t = CommitMode::Batch)]
    pub marks_commit_mode: CommitMode,

    #[clap(long, env, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}
