//! HTTP routing for the local front door

use crate::{
    accepts_gzip, inbound_event, outbound_event, FunctionSet, GatewayConfig, GatewayResponse,
    MinSizeCompression,
};
use anyhow::Result;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use gzip_functions::Function;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared state of the front door
#[derive(Clone)]
pub struct AppState {
    functions: Arc<FunctionSet>,
    config: Arc<GatewayConfig>,
    compression: MinSizeCompression,
}

impl AppState {
    pub fn new(functions: FunctionSet, config: GatewayConfig) -> Self {
        Self {
            compression: MinSizeCompression::new(config.min_compression_size),
            functions: Arc::new(functions),
            config: Arc::new(config),
        }
    }
}

/// Invoke `function` once and translate its response, whichever way it went.
fn invoke<F: Function>(function: &F, event: F::Event) -> GatewayResponse {
    match function.respond(event) {
        Ok(response) => GatewayResponse::from_proxy(&response),
        Err(error) => GatewayResponse::from_proxy(&error),
    }
}

fn log_response(method: &Method, uri: &Uri, name: &str, response: &GatewayResponse) {
    tracing::info!(
        target: "gzip-gateway::server",
        "{method} {uri} -> {name} {} ({} bytes, encoding={:?})",
        response.status,
        response.body.len(),
        response.headers.get(axum::http::header::CONTENT_ENCODING)
    );
}

async fn api_get_gzip(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let functions = &state.functions;
    let response = invoke(&functions.get_gzip, outbound_event(&headers));
    let response = state.compression.apply(accepts_gzip(&headers), response);
    log_response(&method, &uri, "get-gzip", &response);
    response.into_response()
}

async fn api_receive_gzip(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let response = match inbound_event(&state.config, &headers, body) {
        Ok(event) => invoke(&state.functions.receive_gzip, event),
        Err(rejected) => rejected,
    };
    let response = state.compression.apply(accepts_gzip(&headers), response);
    log_response(&method, &uri, "receive-gzip", &response);
    response.into_response()
}

async fn url_get_gzip(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let response = invoke(&state.functions.get_gzip, outbound_event(&headers));
    log_response(&method, &uri, "get-gzip", &response);
    response.into_response()
}

async fn url_return_gzip(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let response = invoke(&state.functions.return_gzip, outbound_event(&headers));
    log_response(&method, &uri, "return-gzip", &response);
    response.into_response()
}

async fn url_receive_gzip(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let response = match inbound_event(&state.config, &headers, body) {
        Ok(event) => invoke(&state.functions.receive_gzip, event),
        Err(rejected) => rejected,
    };
    log_response(&method, &uri, "receive-gzip", &response);
    response.into_response()
}

/// Build the router. The root path behaves like the API gateway, with compression;
/// `/functions/*` behaves like per-function invocation URLs, without it.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api_get_gzip).post(api_receive_gzip))
        .route("/functions/get-gzip", any(url_get_gzip))
        .route("/functions/return-gzip", any(url_return_gzip))
        .route("/functions/receive-gzip", any(url_receive_gzip))
        .with_state(state)
}

/// Serve the functions until ctrl-c.
pub async fn serve(functions: FunctionSet, config: GatewayConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(
        target: "gzip-gateway::server",
        "Listening on http://{} (min compression size {} bytes, binary media types {:?})",
        listener.local_addr()?,
        config.min_compression_size,
        config.binary_media_types
    );

    axum::serve(listener, router(AppState::new(functions, config)))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(target: "gzip-gateway::server", "Failed to listen for ctrl-c: {e}");
            }
        })
        .await?;

    tracing::info!(target: "gzip-gateway::server", "Shut down");
    Ok(())
}
