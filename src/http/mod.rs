//! HTTP transport for the catalog API.
//!
//! Routes:
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/api/v1/prompts` | Paginated, filterable listing |
//! | GET | `/api/v1/prompts/{id}` | Single-prompt detail |
//! | GET | `/api/v1/categories` | Distinct-category facet |
//! | GET | `/` | Health check |
//!
//! The transport owns CORS, status-code mapping, and process lifecycle; all
//! query semantics live in [`CatalogService`].

mod routes;

pub use routes::{AppState, build_router};

use crate::config::PromptdexConfig;
use crate::services::CatalogService;
use crate::{Error, Result};
use axum::http::{HeaderValue, Method, header};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Builds the CORS layer from the configured origin list.
///
/// Origins that fail header-value parsing are dropped with a warning rather
/// than failing startup.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
        .allow_credentials(true)
}

/// Builds the complete application: API routes plus the CORS layer from
/// the configured origins.
#[must_use]
pub fn app(config: &PromptdexConfig, state: AppState) -> axum::Router {
    build_router(state).layer(cors_layer(&config.cors_origins))
}

/// Starts the HTTP server and blocks until shutdown.
///
/// Serves until ctrl-c. In-flight store operations are not cancelled when a
/// client goes away; each is bounded by its own timeout instead.
///
/// # Errors
///
/// Returns an error if the bind address is invalid or the listener cannot
/// be created.
pub async fn serve(config: &PromptdexConfig, catalog: Arc<CatalogService>) -> Result<()> {
    let state = AppState { catalog };
    let app = app(config, state);

    let addr: SocketAddr = format!("{}:{}", config.http_host, config.http_port)
        .parse()
        .map_err(|e: std::net::AddrParseError| Error::OperationFailed {
            operation: "parse_bind_addr".to_string(),
            cause: e.to_string(),
        })?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::OperationFailed {
            operation: "bind_http_listener".to_string(),
            cause: e.to_string(),
        })?;

    tracing::info!(%addr, "Starting promptdex API server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::OperationFailed {
            operation: "serve".to_string(),
            cause: e.to_string(),
        })
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_tolerates_bad_origins() {
        // Header values reject embedded newlines; the layer must still build.
        let origins = vec![
            "http://localhost:3000".to_string(),
            "bad\norigin".to_string(),
        ];
        let _layer = cors_layer(&origins);
    }
}
