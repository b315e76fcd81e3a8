use serde::{Deserialize, Serialize};

use super::zoom_webhook::RecordingObject;

pub const RECORDING_COMPLETED_EVENT_TYPE: &str = "zoom_recording_completed";
pub const DEFAULT_MEETING_TOPIC: &str = "Untitled Meeting";

/// Body of a `repository_dispatch` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DispatchRequest {
    pub event_type: String,
    pub client_payload: ClientPayload,
}

impl DispatchRequest {
    pub fn recording_completed(recording: RecordingObject) -> Self {
        Self {
            event_type: RECORDING_COMPLETED_EVENT_TYPE.to_string(),
            client_payload: ClientPayload::from(recording),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientPayload {
    pub meeting_uuid: String,
    pub meeting_topic: String,
    pub duration: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_email: Option<String>,
}

impl From<RecordingObject> for ClientPayload {
    fn from(recording: RecordingObject) -> Self {
        let meeting_topic = recording
            .topic
            .filter(|topic| !topic.is_empty())
            .unwrap_or_else(|| DEFAULT_MEETING_TOPIC.to_string());

        Self {
            meeting_uuid: recording.uuid,
            meeting_topic,
            duration: recording.duration.unwrap_or(0),
            start_time: recording.start_time,
            host_email: recording.host_email,
        }
    }
}

/// Status and raw body text returned by the dispatch endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResponse {
    pub status: u16,
    pub body: String,
}

impl DispatchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
