use serde::{Deserialize, Serialize};
use std::fmt;

/// Legacy (v1) swap request: opaque string ids plus a model name.
#[derive(Debug, Serialize)]
pub struct SwapRequest {
    pub media_id: String,
    pub face_ids: Vec<String>,
    pub model: String,
}

/// One (replacement image, target face) pair. `face_id` addresses a face
/// from a detection result; `landmarks_str` is the legacy addressing
/// scheme kept for older backends.
#[derive(Debug, Clone, Serialize)]
pub struct FaceSwapPair {
    pub source_image_url: String,
    pub face_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmarks_str: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateSwapTaskRequest {
    pub target_video_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detect_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_image_url: Option<String>,
    pub face_swaps: Vec<FaceSwapPair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_enhance: Option<bool>,
}

impl CreateSwapTaskRequest {
    pub fn new(target_video_url: &str, face_swaps: Vec<FaceSwapPair>) -> Self {
        Self {
            target_video_url: target_video_url.to_string(),
            detect_id: None,
            frame_image_url: None,
            face_swaps,
            face_enhance: None,
        }
    }
}

/// Response of the legacy swap endpoint (flat, not enveloped).
#[derive(Debug, Deserialize)]
pub struct LegacySwapResponse {
    pub task_id: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub message: Option<String>,
}

/// Point-in-time task state as reported by the backend. Not cached or
/// reconciled across polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Queuing,
    Processing,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Queuing => "queuing",
            TaskStatus::Processing => "processing",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// Payload of a successful task creation.
#[derive(Debug, Deserialize)]
pub struct SwapTaskData {
    pub task_id: String,
    pub status: TaskStatus,
}

/// Payload of a status poll.
#[derive(Debug, Deserialize)]
pub struct TaskStatusData {
    pub task_id: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub result_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
