//! HTTP server assembly: stores, seed data, router, lifecycle.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::{self, AppState};
use crate::seed;
use crate::store::{EntityStore, Latency};

/// Configuration for the EcoManager server.
pub struct ServerConfig {
    pub port: u16,
    /// Permissive CORS and bind on all interfaces, for a local frontend
    /// dev server.
    pub dev_mode: bool,
    /// Load the demonstration dataset at startup.
    pub seed: bool,
    /// Apply the original mocked per-verb network delays.
    pub simulate_latency: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            dev_mode: false,
            seed: true,
            simulate_latency: true,
        }
    }
}

/// Build the application state the router is served with.
pub fn build_state(config: &ServerConfig) -> Arc<AppState> {
    let latency = if config.simulate_latency {
        Latency::simulated()
    } else {
        Latency::none()
    };
    let state = if config.seed {
        AppState {
            clients: EntityStore::with_records(seed::clients(), latency),
            processes: EntityStore::with_records(seed::processes(), latency),
            technicians: EntityStore::with_records(seed::technicians(), latency),
        }
    } else {
        AppState {
            clients: EntityStore::new(latency),
            processes: EntityStore::new(latency),
            technicians: EntityStore::new(latency),
        }
    };
    Arc::new(state)
}

/// Build the full application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    api::api_router().with_state(state)
}

/// Start the server and run until ctrl-c.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let state = build_state(&config);
    let mut app = build_router(state);

    if config.dev_mode {
        app = app.layer(CorsLayer::permissive());
    }

    let host = if config.dev_mode { "0.0.0.0" } else { "127.0.0.1" };
    let addr = format!("{}:{}", host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    let local_addr = listener.local_addr()?;
    tracing::info!(%local_addr, seed = config.seed, "EcoManager running");
    println!("EcoManager running at http://{}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
    } else {
        println!("\nShutting down...");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_config() -> ServerConfig {
        ServerConfig {
            simulate_latency: false,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn health_via_full_router() {
        let app = build_router(build_state(&test_config()));
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn seeded_state_serves_all_three_collections() {
        let app = build_router(build_state(&test_config()));
        for uri in ["/api/clients", "/api/processes", "/api/technicians"] {
            let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let resp = app.clone().oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            let bytes = resp.into_body().collect().await.unwrap().to_bytes();
            let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(json.as_array().unwrap().len(), 3, "collection at {uri}");
        }
    }

    #[tokio::test]
    async fn unseeded_state_starts_empty() {
        let config = ServerConfig {
            seed: false,
            simulate_latency: false,
            ..Default::default()
        };
        let app = build_router(build_state(&config));
        let req = Request::builder()
            .uri("/api/clients")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 0);
    }

    #[test]
    fn server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert!(!config.dev_mode);
        assert!(config.seed);
        assert!(config.simulate_latency);
    }
}
