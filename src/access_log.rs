//! Per-request access logging.
//!
//! Deployments usually sit behind Cloudflare or a reverse proxy, so the socket peer is only the
//! last resort when resolving who made a request.

use axum::{
    extract::{ConnectInfo, Request},
    http::{HeaderMap, header::USER_AGENT},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;

/// Middleware logging the client, user agent, request line, and response status.
pub async fn log_request(request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_address(request.headers(), peer);
    let user_agent = header_value(request.headers(), USER_AGENT.as_str())
        .unwrap_or_default()
        .to_string();
    let method = request.method().clone();
    let version = request.version();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    tracing::info!(
        client = %client,
        user_agent = %user_agent,
        method = %method,
        version = ?version,
        uri = %uri,
        status = response.status().as_u16(),
        "Handled request"
    );
    response
}

/// Resolve the originating client address from proxy headers, falling back to `peer`.
///
/// Precedence: `Cf-Connecting-Ip` (annotated with `Cf-Ipcountry`), `X-Real-Ip`,
/// `X-Forwarded-For`, then the socket address.
pub fn client_address(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(remote) = header_value(headers, "cf-connecting-ip") {
        let country = header_value(headers, "cf-ipcountry").unwrap_or_default();
        return format!("{remote} ({country})");
    }
    if let Some(remote) = header_value(headers, "x-real-ip") {
        return remote.to_string();
    }
    if let Some(remote) = header_value(headers, "x-forwarded-for") {
        return remote.to_string();
    }
    peer.map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
