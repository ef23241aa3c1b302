use std::sync::Arc;

use crisol_api::auth::JwtVerifier;
use crisol_api::config::AppConfig;
use crisol_api::middleware::{OriginPolicy, WriteGate};
use crisol_api::state::AppState;
use crisol_api::store::memory::MemoryStore;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up SIMULATION_MODE, the JWT
    // secret, and the port.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    if config.jwt_secret.is_empty() {
        tracing::warn!("CRISOL_JWT_SECRET is not set; admin routes will reject every credential");
    }
    tracing::info!(simulation = config.simulation_mode, "starting crisol-api");

    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        verifier: Arc::new(JwtVerifier::new(&config.jwt_secret)),
        write_gate: WriteGate::new(config.simulation_mode),
        origin_policy: Arc::new(OriginPolicy::storefront_defaults()),
    };

    let app = crisol_api::app(state);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("crisol-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
