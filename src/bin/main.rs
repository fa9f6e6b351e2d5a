use std::net::SocketAddr;

use anyhow::Context;
use eduverse_service::bootstrap::initialize_admin_user;
use eduverse_service::database::get_database_connection;
use eduverse_service::state::{AppSettings, AppState};
use eduverse_service::utils::jwt::JwtManager;
use eduverse_service::{app, config::APP_CONFIG, utils::tracing::init_standard_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"), &APP_CONFIG.log_level);

    tracing::info!("Starting application...");

    let db_connection = get_database_connection(&APP_CONFIG.database_url).await?;

    tracing::info!("Checking admin user...");
    if let Err(e) = initialize_admin_user(
        &db_connection,
        &APP_CONFIG.admin_email,
        &APP_CONFIG.admin_password,
    )
    .await
    {
        tracing::error!("Failed to initialize admin user: {:#}", e);
        tracing::warn!("Continuing without admin user initialization...");
    }

    let settings = AppSettings::from_config(&APP_CONFIG);
    tracing::info!(
        commit_mode = ?settings.marks_commit_mode,
        max_upload_bytes = settings.max_upload_bytes,
        "Internal marks upload settings"
    );

    let state = AppState::new(
        db_connection,
        JwtManager::new(&APP_CONFIG.jwt_secret),
        settings,
    );
    let app = app::create_app(state)?;

    let http_address = format!("0.0.0.0:{}", APP_CONFIG.port);
    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(&http_address)
        .await
        .with_context(|| format!("Failed to bind {http_address}"))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server stopped with an error")?;

    Ok(())
}
