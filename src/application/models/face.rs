use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct DetectFacesRequest {
    pub image_url: String,
}

/// Read-only projection of the backend's detection output. `face_id` is an
/// opaque correlation handle used to populate a swap request; the bounding
/// box, legacy landmark string and thumbnail are optional presentation
/// hints.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectedFace {
    pub index: usize,
    pub face_id: i64,
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,
    #[serde(default)]
    pub landmarks_str: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetectFacesData {
    pub faces: Vec<DetectedFace>,
    #[serde(default)]
    pub detect_id: Option<String>,
    pub frame_image: String,
}
