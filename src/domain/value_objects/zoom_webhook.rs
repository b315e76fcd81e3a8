use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const URL_VALIDATION_EVENT: &str = "endpoint.url_validation";
pub const RECORDING_COMPLETED_EVENT: &str = "recording.completed";

/// Envelope shared by every Zoom webhook delivery.
///
/// `event` is kept optional so that bodies without a string `event` field are
/// classified as unrecognized instead of being rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    pub event: Option<String>,
    pub payload: Value,
}

impl InboundEvent {
    pub fn from_slice(raw: &[u8]) -> Result<Self> {
        let body: Value =
            serde_json::from_slice(raw).context("request body is not valid JSON")?;
        ensure!(!body.is_null(), "request body is JSON null");

        let event = body
            .get("event")
            .and_then(Value::as_str)
            .map(str::to_string);
        let payload = body.get("payload").cloned().unwrap_or(Value::Null);

        Ok(Self { event, payload })
    }
}

// endpoint.url_validation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UrlValidationPayload {
    pub plain_token: String,
    #[serde(default)]
    pub encrypted_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UrlValidationResponse {
    pub plain_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encrypted_token: Option<String>,
}

// recording.completed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordingCompletedPayload {
    pub object: RecordingObject,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordingObject {
    pub uuid: String,
    pub topic: Option<String>,
    pub duration: Option<u64>,
    pub start_time: Option<String>,
    pub host_email: Option<String>,
}
