//! HTTP surface for Quotaday.
//!
//! This module exposes a compact Axum router:
//!
//! - `GET /quote` – Return a random quotation, or the one at `?id=N`. The representation follows
//!   the `Accept` header: `text/html` yields an HTML page, anything else JSON
//!   (`{"Quote": ..., "Author": ...}`).
//! - `POST /quote` – Store the JSON quotation in the body and echo it back with `201 Created`.
//! - `GET /` – Alias of `GET /quote`.
//! - `GET /metrics` – Observe traffic counters alongside the quote book size and capacity.
//!
//! Quote book errors map to `400 Bad Request` (empty book, unknown id) and
//! `507 Insufficient Storage` (book full); the body carries the error text.

use crate::access_log;
use crate::metrics::{MetricsSnapshot, QuoteMetrics};
use crate::quote::{Format, QuoteError, QuoteStore, Quotation, negotiate, render};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::ACCEPT},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;
use std::sync::Arc;
use thiserror::Error;

/// Shared handler state: the quote store and the traffic counters.
pub struct AppState<S> {
    store: Arc<S>,
    metrics: Arc<QuoteMetrics>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

/// Build the HTTP router serving quotations from `store`.
pub fn create_router<S>(store: Arc<S>) -> Router
where
    S: QuoteStore + 'static,
{
    let state = AppState {
        store,
        metrics: Arc::new(QuoteMetrics::new()),
    };

    Router::new()
        .route("/", get(get_quote::<S>))
        .route("/quote", get(get_quote::<S>).post(post_quote::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .layer(middleware::from_fn(access_log::log_request))
        .with_state(state)
}

/// Query string accepted by `GET /quote`.
#[derive(Deserialize)]
struct QuoteParams {
    /// Optional position of the requested quotation; random when absent.
    #[serde(default)]
    id: Option<String>,
}

/// Return a random quotation or the one selected by `id`, rendered per the `Accept` header.
async fn get_quote<S>(
    State(state): State<AppState<S>>,
    Query(params): Query<QuoteParams>,
    headers: HeaderMap,
) -> Result<Response, ApiError>
where
    S: QuoteStore,
{
    let quote = match params.id.as_deref() {
        Some(raw) => state.store.get(parse_index(raw)?)?,
        None => state.store.random()?,
    };
    state.metrics.record_served();

    let accept = headers.get(ACCEPT).and_then(|value| value.to_str().ok());
    Ok(match negotiate(accept) {
        Format::Html => Html(render::to_html(&quote)).into_response(),
        Format::Json => Json(quote).into_response(),
    })
}

/// Parse a signed index; integers that overflow `i64` saturate so they report out of range.
fn parse_index(raw: &str) -> Result<i64, ApiError> {
    match raw.trim().parse::<i64>() {
        Ok(index) => Ok(index),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(ApiError::InvalidId(raw.to_string())),
        },
    }
}

/// Store the quotation carried in the request body.
async fn post_quote<S>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Quotation>), ApiError>
where
    S: QuoteStore,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::UnreadableBody("empty body".into()));
    }
    let quote: Quotation = serde_json::from_slice(&body)
        .map_err(|err| ApiError::UnreadableBody(format!("invalid quote format: {err}")))?;

    if let Err(err) = state.store.add(quote.clone()) {
        if matches!(err, QuoteError::Full { .. }) {
            state.metrics.record_rejected();
        }
        tracing::warn!(error = %err, "Rejected quotation");
        return Err(err.into());
    }
    state.metrics.record_added();
    tracing::info!(author = %quote.author, stored = state.store.len(), "Stored quotation");

    Ok((StatusCode::CREATED, Json(quote)))
}

/// Response body for `GET /metrics`.
#[derive(Serialize)]
struct MetricsResponse {
    #[serde(flatten)]
    counters: MetricsSnapshot,
    stored: usize,
    capacity: usize,
}

/// Return traffic counters plus the current fill level of the quote book.
async fn get_metrics<S>(State(state): State<AppState<S>>) -> Json<MetricsResponse>
where
    S: QuoteStore,
{
    Json(MetricsResponse {
        counters: state.metrics.snapshot(),
        stored: state.store.len(),
        capacity: state.store.capacity(),
    })
}

#[derive(Debug, Error)]
enum ApiError {
    #[error(transparent)]
    Quote(#[from] QuoteError),
    #[error("invalid id {0:?}")]
    InvalidId(String),
    #[error("could not read request body: {0}")]
    UnreadableBody(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Quote(QuoteError::Full { .. }) => StatusCode::INSUFFICIENT_STORAGE,
            Self::Quote(QuoteError::Empty | QuoteError::OutOfRange { .. })
            | Self::InvalidId(_)
            | Self::UnreadableBody(_) => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}
