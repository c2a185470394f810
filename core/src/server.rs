//! The HTTP surface of the gateway
//!
//! A single handler is mounted at the root and answers requests on every
//! path. Successful responses carry the JSON body. Errors are reported as
//! `400 Bad Request` if the client can correct them and as
//! `500 Internal Server Error` otherwise, with the error message as body.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::{
    error::GatewayError,
    gateway::{Gateway, GatewayOutput, RequestParams},
    index::SpatialIndex,
    parse::RangeDecoder,
};

/// Creates a router that answers every request with the given gateway
pub fn router<I, D>(gateway: Arc<Gateway<I, D>>) -> Router
where
    I: SpatialIndex + 'static,
    D: RangeDecoder + 'static,
{
    Router::new()
        .fallback(handle_request::<I, D>)
        .layer(TraceLayer::new_for_http())
        .with_state(gateway)
}

/// Serves the router on the given listener until Ctrl-C or SIGTERM
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(address = %addr, "gateway listening");
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "unable to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                error!(error = %e, "unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutting down");
}

async fn handle_request<I, D>(
    State(gateway): State<Arc<Gateway<I, D>>>,
    params: Result<Query<RequestParams>, QueryRejection>,
) -> Response
where
    I: SpatialIndex,
    D: RangeDecoder,
{
    let Query(params) = match params {
        Ok(p) => p,
        Err(rejection) => return respond(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    match gateway.run(&params).await {
        Ok(GatewayOutput::Raw(body)) => respond(StatusCode::OK, body),
        Ok(GatewayOutput::Envelope(envelope)) => match serde_json::to_vec(&envelope) {
            Ok(body) => respond(StatusCode::OK, body),
            Err(e) => respond(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        },
        Err(err) => error_response(err),
    }
}

fn error_response(err: GatewayError) -> Response {
    if err.is_client_error() {
        debug!(error = %err, "rejected request");
    } else {
        error!(error = %err, "unable to answer request");
    }
    respond(err.status(), err.to_string())
}

fn respond(status: StatusCode, body: impl Into<Body>) -> Response {
    (
        status,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::CONTENT_TYPE, "application/json"),
        ],
        body.into(),
    )
        .into_response()
}
