use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::{HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tracing::{info, Span};

use lineforge_sales::Outcome;

use crate::app::errors;
use crate::app::services::AppServices;

pub const OUTCOME_HEADER: HeaderName = HeaderName::from_static("x-lineforge-outcome");
pub const RECONCILIATION_HEADER: HeaderName =
    HeaderName::from_static("x-lineforge-reconciliation");

pub fn router() -> Router {
    Router::new().nest("/orders", orders_router())
}

fn orders_router() -> Router {
    Router::new().route("/compute-items", post(compute_items))
}

/// Reconcile the quantities of an order form's line tree after a single edit.
///
/// Always answers `200` for JSON bodies: payloads with nothing to reconcile
/// come back as `{}` with `x-lineforge-outcome: skipped`.
pub async fn compute_items(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let Json(payload) = match body {
        Ok(v) => v,
        Err(rejection) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_json",
                rejection.body_text(),
            );
        }
    };

    let span = Span::current();
    let outcome = match tokio::task::spawn_blocking(move || {
        span.in_scope(|| services.engine().compute_items(&payload))
    })
    .await
    {
        Ok(outcome) => outcome,
        Err(e) => return errors::join_error_to_response(e),
    };

    let mut response = (StatusCode::OK, Json(outcome.to_response())).into_response();
    let headers = response.headers_mut();
    headers.insert(OUTCOME_HEADER, HeaderValue::from_static(outcome.as_str()));
    if let Outcome::Reconciled { reconciliation, .. } = &outcome {
        info!(reconciliation = reconciliation.as_str(), "order items computed");
        headers.insert(
            RECONCILIATION_HEADER,
            HeaderValue::from_static(reconciliation.as_str()),
        );
    }
    response
}
