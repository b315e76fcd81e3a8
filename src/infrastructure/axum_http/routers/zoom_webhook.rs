use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{
        Method, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
        },
    },
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::info;

use crate::{
    application::usecases::zoom_webhook::{WebhookOutcome, ZoomWebhookUseCase},
    infrastructure::axum_http::error_responses::AppError,
};

pub const DISPATCH_TRIGGERED_MESSAGE: &str = "GitHub Actions triggered";
pub const DISPATCH_FAILED_ERROR: &str = "Failed to trigger GitHub Actions";
pub const EVENT_IGNORED_BODY: &str = "Event received but not processed";

#[derive(Debug, Serialize)]
pub struct DispatchTriggeredResponse {
    pub success: bool,
    pub message: String,
    pub meeting_uuid: String,
}

#[derive(Debug, Serialize)]
pub struct DispatchFailedResponse {
    pub success: bool,
    pub error: String,
    pub details: String,
}

/// The relay answers on every path, so the handler is mounted as the fallback.
pub fn routes(usecase: Arc<ZoomWebhookUseCase>) -> Router {
    Router::new().fallback(handle).with_state(usecase)
}

pub async fn handle(
    State(usecase): State<Arc<ZoomWebhookUseCase>>,
    method: Method,
    body: Bytes,
) -> Result<Response, AppError> {
    if method == Method::OPTIONS {
        return Ok(cors_preflight());
    }

    if method != Method::POST {
        info!(method = %method, "zoom_webhook: method not allowed");
        return Err(AppError::MethodNotAllowed);
    }

    let outcome = usecase.handle(&body).await?;
    Ok(outcome_response(outcome))
}

fn cors_preflight() -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            (ACCESS_CONTROL_MAX_AGE, "86400"),
        ],
    )
        .into_response()
}

fn outcome_response(outcome: WebhookOutcome) -> Response {
    match outcome {
        WebhookOutcome::UrlValidated(response) => (StatusCode::OK, Json(response)).into_response(),
        WebhookOutcome::DispatchTriggered { meeting_uuid } => (
            StatusCode::OK,
            Json(DispatchTriggeredResponse {
                success: true,
                message: DISPATCH_TRIGGERED_MESSAGE.to_string(),
                meeting_uuid,
            }),
        )
            .into_response(),
        WebhookOutcome::DispatchFailed { details, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(DispatchFailedResponse {
                success: false,
                error: DISPATCH_FAILED_ERROR.to_string(),
                details,
            }),
        )
            .into_response(),
        WebhookOutcome::Ignored { .. } => (StatusCode::OK, EVENT_IGNORED_BODY).into_response(),
    }
}
