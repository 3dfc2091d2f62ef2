use anyhow::Context;
use tokio::net::TcpListener;

use roi_calculator_backend::config::Config;
use roi_calculator_backend::logging::{init_logging, LoggingConfig};
use roi_calculator_backend::{app, build_state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    let logging = LoggingConfig::from_env().context("invalid logging configuration")?;
    init_logging(&logging).context("failed to initialize logging")?;

    let config = Config::from_env().context("invalid configuration")?;
    let addr = config.listen_addr;
    let roi_route = config.roi_route.clone();

    tracing::info!(
        "Response format: {:?}, persistence: {:?}",
        config.response_format,
        config.persistence
    );

    let state = build_state(config).context("failed to set up record store")?;
    let app = app::create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("ROI calculator running at http://{}{}", addr, roi_route);
    axum::serve(listener, app).await?;

    Ok(())
}
