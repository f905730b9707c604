// Server module - router assembly and listener setup used by main.rs

use axum::Router;
use std::net::{SocketAddr, TcpListener};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::infrastructure::AppState;

/// Catalog routes, static assets under `/static` and request tracing
pub fn build_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .merge(api::catalog_router(state))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
}

/// Find an available port starting from the preferred port on a specific IP
pub fn find_available_port_on_ip(preferred_port: u16, ip: &str) -> Option<u16> {
    if TcpListener::bind((ip, preferred_port)).is_ok() {
        return Some(preferred_port);
    }

    // Scan next 100 ports
    ((preferred_port.saturating_add(1))..(preferred_port.saturating_add(100)))
        .find(|&port| TcpListener::bind((ip, port)).is_ok())
}

/// Find an available port starting from the preferred port (0.0.0.0)
pub fn find_available_port(preferred_port: u16) -> Option<u16> {
    find_available_port_on_ip(preferred_port, "0.0.0.0")
}

/// Bind the first free port from `preferred_port` and serve until the
/// process stops
pub async fn serve(app: Router, preferred_port: u16) -> Result<(), String> {
    let port = find_available_port(preferred_port)
        .ok_or_else(|| format!("No available port from {}", preferred_port))?;

    if port != preferred_port {
        tracing::warn!(
            "Preferred port {} was not available, using port {} instead",
            preferred_port,
            port
        );
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("Local library listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("HTTP server error: {}", e))
}
