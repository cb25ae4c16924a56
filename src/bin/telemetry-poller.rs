// Poller entry point - Periodic refresh of the monitoring view
use std::sync::Arc;

use sensor_telemetry::application::poller::Poller;
use sensor_telemetry::application::scheduler::{PollingHandle, PollingTask};
use sensor_telemetry::domain::range::RangeSpec;
use sensor_telemetry::infrastructure::config::load_poller_config;
use sensor_telemetry::infrastructure::console_sink::ConsoleSink;
use sensor_telemetry::infrastructure::http_source::HttpTelemetrySource;
use sensor_telemetry::infrastructure::logging::init_tracing;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_poller_config()?;
    let timezone = config.timezone()?;

    let source = Arc::new(HttpTelemetrySource::new(&config.gateway_url)?);
    let poller = Poller::new(source, Box::new(ConsoleSink), timezone);

    tracing::info!(
        gateway = %config.gateway_url,
        range = %config.range,
        interval_secs = config.interval_secs,
        "Starting telemetry poller"
    );
    let handle = PollingTask::start(poller, config.range, config.interval());

    tokio::select! {
        result = tokio::signal::ctrl_c() => result?,
        result = read_range_changes(&handle) => result?,
    }

    handle.stop().await?;
    tracing::info!("Telemetry poller stopped");
    Ok(())
}

/// Each stdin line selects a new range, e.g. `6h`.
async fn read_range_changes(handle: &PollingHandle) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match line.trim().parse::<RangeSpec>() {
            Ok(range) => handle.set_range(range),
            Err(e) => tracing::warn!(
                input = line.trim(),
                "{}, expected one of 1h, 6h, 12h, 1d, 7d",
                e
            ),
        }
    }

    // Detached stdin: keep polling until interrupted.
    std::future::pending::<()>().await;
    Ok(())
}
