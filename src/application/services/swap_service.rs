use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::{
    application::models::face::{DetectFacesData, DetectFacesRequest},
    application::models::media::MediaUpload,
    application::models::swap::{CreateSwapTaskRequest, SwapTaskData, TaskStatusData},
    application::models::ApiEnvelope,
    application::services::file_form,
    error::ApiError,
    transport::ApiHttpClient,
};

/// V2 media-swap endpoints: uploads, face detection, task creation and
/// status polling. All business logic lives on the backend; these are
/// request builders over the shared transport.
#[async_trait]
pub trait SwapService: Send + Sync {
    /// Uploads a target video or image.
    async fn upload_media(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<MediaUpload, ApiError>;

    /// Uploads a replacement face image.
    async fn upload_face(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<MediaUpload, ApiError>;

    /// Uploads a single video frame for detection.
    async fn upload_frame(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<MediaUpload, ApiError>;

    /// Runs face detection against an already-hosted image.
    async fn detect_faces(&self, image_url: &str) -> Result<DetectFacesData, ApiError>;

    /// Uploads a frame and runs detection on it in one call.
    async fn detect_faces_from_upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<DetectFacesData, ApiError>;

    /// Creates a swap task from a target video and ordered face pairs.
    async fn create_swap_task(
        &self,
        request: &CreateSwapTaskRequest,
    ) -> Result<SwapTaskData, ApiError>;

    /// Polls a task. Each call is an independent snapshot.
    async fn get_task_status(&self, task_id: &str) -> Result<TaskStatusData, ApiError>;
}

pub struct SwapServiceImpl {
    client: Arc<ApiHttpClient>,
}

impl SwapServiceImpl {
    pub fn new(client: Arc<ApiHttpClient>) -> Self {
        Self { client }
    }

    async fn upload_to(
        &self,
        endpoint: &str,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
        timeout: Option<Duration>,
    ) -> Result<MediaUpload, ApiError> {
        info!("Uploading {} to {}", filename, endpoint);
        let form = file_form(bytes, filename, content_type)?;
        self.client.post_multipart(endpoint, form, timeout).await
    }
}

#[async_trait]
impl SwapService for SwapServiceImpl {
    async fn upload_media(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<MediaUpload, ApiError> {
        // Target videos are the largest transfers; give them the full
        // upload timeout.
        let timeout = self.client.upload_timeout();
        self.upload_to("/v2/media/upload", bytes, filename, content_type, Some(timeout))
            .await
    }

    async fn upload_face(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<MediaUpload, ApiError> {
        self.upload_to("/v2/media/upload/face", bytes, filename, content_type, None)
            .await
    }

    async fn upload_frame(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<MediaUpload, ApiError> {
        self.upload_to("/v2/media/upload/frame", bytes, filename, content_type, None)
            .await
    }

    async fn detect_faces(&self, image_url: &str) -> Result<DetectFacesData, ApiError> {
        info!("Detecting faces in {}", image_url);
        let request = DetectFacesRequest {
            image_url: image_url.to_string(),
        };

        let envelope: ApiEnvelope<DetectFacesData> =
            self.client.post("/v2/face/detect", &request).await?;
        let data = envelope.into_data()?;
        debug!("Detected {} faces", data.faces.len());
        Ok(data)
    }

    async fn detect_faces_from_upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<DetectFacesData, ApiError> {
        info!("Detecting faces in uploaded frame {}", filename);
        let form = file_form(bytes, filename, content_type)?;

        let envelope: ApiEnvelope<DetectFacesData> = self
            .client
            .post_multipart("/v2/face/detect/upload", form, None)
            .await?;
        envelope.into_data()
    }

    async fn create_swap_task(
        &self,
        request: &CreateSwapTaskRequest,
    ) -> Result<SwapTaskData, ApiError> {
        info!(
            "Creating swap task for {} with {} face pair(s)",
            request.target_video_url,
            request.face_swaps.len()
        );

        let envelope: ApiEnvelope<SwapTaskData> =
            self.client.post("/v2/faceswap/create", request).await?;
        envelope.into_data()
    }

    async fn get_task_status(&self, task_id: &str) -> Result<TaskStatusData, ApiError> {
        let envelope: ApiEnvelope<TaskStatusData> = self
            .client
            .get(&format!("/v2/faceswap/task/{task_id}"))
            .await?;
        envelope.into_data()
    }
}
