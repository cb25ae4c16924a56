// Gateway entry point - Dependency injection and server setup
use std::sync::Arc;

use sensor_telemetry::application::telemetry_service::TelemetryService;
use sensor_telemetry::infrastructure::config::load_gateway_config;
use sensor_telemetry::infrastructure::credential_providers;
use sensor_telemetry::infrastructure::kusto_repository::KustoRepository;
use sensor_telemetry::infrastructure::logging::init_tracing;
use sensor_telemetry::presentation::app_state::AppState;
use sensor_telemetry::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_gateway_config()?;

    // Store access (infrastructure layer)
    let credentials = credential_providers::from_config(&config)?;
    let repository = Arc::new(KustoRepository::new(
        config.cluster_url.clone(),
        config.database.clone(),
        credentials,
    )?);

    // Use case (application layer)
    let telemetry_service = TelemetryService::new(repository, config.table.clone());

    let state = Arc::new(AppState { telemetry_service });

    tracing::info!(
        database = %config.database,
        auth = ?config.auth,
        "Starting telemetry gateway on {}",
        config.listen_addr
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
