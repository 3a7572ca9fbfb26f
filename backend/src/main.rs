//! Orders service entry-point: loads configuration and serves the REST API.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use orders_service::inbound::http::health::HealthState;
use orders_service::server::{ServerConfig, create_server};
use orders_service::settings::OrdersSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = OrdersSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;
    let config = ServerConfig::from_settings(&settings)?;

    let health_state = web::Data::new(HealthState::new(config.users_service_url().as_str()));
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;

    health_state.mark_unhealthy();
    info!("orders service stopped");
    result
}
