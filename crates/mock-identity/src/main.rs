//! Mock identity service binary.
//!
//! Seeds one demo user and serves the mock tenant on `MOCK_PORT`.

use std::sync::Arc;

use mock_identity::{router, MockConfig, MockState, MockUser};
use tracing::info;

#[tokio::main]
async fn main() {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = MockConfig::from_env();
    let listen_port = config.listen_port;
    info!(
        client_id = %config.client_id,
        connection = %config.connection,
        "mock tenant configured"
    );

    let state = Arc::new(MockState::new(config));
    state
        .users
        .insert(MockUser::new("auth0|demo", "demo@example.com", "demo-password"))
        .await;
    info!(username = "demo@example.com", "demo user registered");

    let addr = format!("0.0.0.0:{listen_port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");

    info!(address = %addr, "mock identity service listening");
    axum::serve(listener, router(state))
        .await
        .expect("server error");
}
