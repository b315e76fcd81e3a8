use std::sync::Arc;

use anyhow::{Context, Result};
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use tracing::{info, warn};

use crate::domain::{
    repositories::repository_dispatch::RepositoryDispatchClient,
    value_objects::{
        repository_dispatch::DispatchRequest,
        zoom_webhook::{
            InboundEvent, RECORDING_COMPLETED_EVENT, RecordingCompletedPayload,
            URL_VALIDATION_EVENT, UrlValidationPayload, UrlValidationResponse,
        },
    },
};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq)]
pub enum WebhookOutcome {
    UrlValidated(UrlValidationResponse),
    DispatchTriggered {
        meeting_uuid: String,
    },
    DispatchFailed {
        meeting_uuid: String,
        status: u16,
        details: String,
    },
    Ignored {
        event: Option<String>,
    },
}

pub struct ZoomWebhookUseCase {
    dispatch_client: Arc<dyn RepositoryDispatchClient + Send + Sync>,
    webhook_secret_token: Option<String>,
}

impl ZoomWebhookUseCase {
    pub fn new(
        dispatch_client: Arc<dyn RepositoryDispatchClient + Send + Sync>,
        webhook_secret_token: Option<String>,
    ) -> Self {
        Self {
            dispatch_client,
            webhook_secret_token,
        }
    }

    /// Classifies a raw webhook body and performs at most one dispatch.
    pub async fn handle(&self, raw_body: &[u8]) -> Result<WebhookOutcome> {
        let inbound = InboundEvent::from_slice(raw_body)?;

        match inbound.event.as_deref() {
            Some(URL_VALIDATION_EVENT) => {
                info!("zoom_webhook: endpoint validation received");
                self.handle_url_validation(inbound.payload)
                    .map(WebhookOutcome::UrlValidated)
            }
            Some(RECORDING_COMPLETED_EVENT) => {
                info!("zoom_webhook: recording completed received");
                self.handle_recording_completed(inbound.payload).await
            }
            other => {
                info!(event = ?other, "zoom_webhook: event received but not processed");
                Ok(WebhookOutcome::Ignored {
                    event: other.map(str::to_string),
                })
            }
        }
    }

    pub fn handle_url_validation(&self, payload: Value) -> Result<UrlValidationResponse> {
        let payload: UrlValidationPayload =
            serde_json::from_value(payload).context("invalid endpoint.url_validation payload")?;

        let encrypted_token = match self.webhook_secret_token.as_deref() {
            Some(secret) => Some(sign_plain_token(secret, &payload.plain_token)?),
            None => payload.encrypted_token,
        };

        Ok(UrlValidationResponse {
            plain_token: payload.plain_token,
            encrypted_token,
        })
    }

    pub async fn handle_recording_completed(&self, payload: Value) -> Result<WebhookOutcome> {
        let payload: RecordingCompletedPayload =
            serde_json::from_value(payload).context("invalid recording.completed payload")?;

        let request = DispatchRequest::recording_completed(payload.object);
        let meeting_uuid = request.client_payload.meeting_uuid.clone();

        info!(
            meeting_uuid = %meeting_uuid,
            meeting_topic = %request.client_payload.meeting_topic,
            duration = request.client_payload.duration,
            "zoom_webhook: dispatching recording"
        );

        let response = self
            .dispatch_client
            .send_dispatch(request)
            .await
            .context("GitHub dispatch request failed")?;

        if response.is_success() {
            info!(meeting_uuid = %meeting_uuid, status = response.status, "zoom_webhook: dispatch accepted");
            return Ok(WebhookOutcome::DispatchTriggered { meeting_uuid });
        }

        warn!(
            meeting_uuid = %meeting_uuid,
            status = response.status,
            response_body = %response.body,
            "zoom_webhook: dispatch rejected"
        );
        Ok(WebhookOutcome::DispatchFailed {
            meeting_uuid,
            status: response.status,
            details: response.body,
        })
    }
}

/// Lowercase hex HMAC-SHA256 of `plain_token` keyed by `secret`.
pub fn sign_plain_token(secret: &str, plain_token: &str) -> Result<String> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).context("invalid webhook secret token")?;
    mac.update(plain_token.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
