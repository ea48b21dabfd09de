use crate::AppState;
use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, Method, Uri};
use axum::response::IntoResponse;
use axum::Json;
use std::net::{IpAddr, SocketAddr};

pub async fn receive_webhook(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let client_ip = client_ip(&headers, peer.map(|ConnectInfo(addr)| addr));
    tracing::info!(client_ip = ?client_ip, "incoming webhook");

    let timestamp = header_str(&headers, "walletpay-timestamp");
    let signature = header_str(&headers, "walletpay-signature");

    let result = state
        .dispatcher
        .handle(client_ip, method.as_str(), uri.path(), timestamp, signature, &body)
        .await;

    match result {
        Ok(outcome) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({"message": outcome.message()})),
        )
            .into_response(),
        Err(rejection) => {
            if rejection.status().is_server_error() {
                tracing::error!(error = %rejection, "webhook dispatch failed");
            } else {
                tracing::warn!(error = %rejection, "webhook rejected");
            }
            (
                rejection.status(),
                Json(serde_json::json!({"detail": rejection.detail()})),
            )
                .into_response()
        }
    }
}

pub async fn health() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "ok")
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// A forwarded-for header takes precedence over the peer address and is not
/// fallen back from: a proxy that sends garbage fails the allow-list.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<IpAddr> {
    if let Some(forwarded) = header_str(headers, "x-forwarded-for") {
        return forwarded
            .split(',')
            .next()
            .unwrap_or("")
            .trim()
            .parse()
            .ok();
    }
    peer.map(|addr| addr.ip())
}
