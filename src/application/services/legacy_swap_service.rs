use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::{
    application::models::media::MediaUpload,
    application::models::swap::{LegacySwapResponse, SwapRequest, TaskStatusData},
    application::models::ApiEnvelope,
    application::services::file_form,
    error::ApiError,
    transport::ApiHttpClient,
};

/// First-revision media-swap endpoints. Kept alongside the v2 group; the
/// backend still serves both.
#[async_trait]
pub trait LegacySwapService: Send + Sync {
    /// Uploads a media file. Uses the long upload timeout.
    async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<MediaUpload, ApiError>;

    /// Requests a swap for an uploaded media item.
    async fn swap(
        &self,
        media_id: &str,
        face_ids: Vec<String>,
        model: &str,
    ) -> Result<LegacySwapResponse, ApiError>;

    /// Polls a task by id.
    async fn get_task(&self, task_id: &str) -> Result<TaskStatusData, ApiError>;
}

pub struct LegacySwapServiceImpl {
    client: Arc<ApiHttpClient>,
}

impl LegacySwapServiceImpl {
    pub fn new(client: Arc<ApiHttpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LegacySwapService for LegacySwapServiceImpl {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        content_type: &str,
    ) -> Result<MediaUpload, ApiError> {
        info!("Uploading media file: {}", filename);
        let form = file_form(bytes, filename, content_type)?;
        self.client
            .post_multipart("/faceswap/upload", form, None)
            .await
    }

    async fn swap(
        &self,
        media_id: &str,
        face_ids: Vec<String>,
        model: &str,
    ) -> Result<LegacySwapResponse, ApiError> {
        info!("Requesting swap for media {}", media_id);
        let request = SwapRequest {
            media_id: media_id.to_string(),
            face_ids,
            model: model.to_string(),
        };
        self.client.post("/faceswap/swap", &request).await
    }

    async fn get_task(&self, task_id: &str) -> Result<TaskStatusData, ApiError> {
        let envelope: ApiEnvelope<TaskStatusData> = self
            .client
            .get(&format!("/faceswap/tasks/{task_id}"))
            .await?;
        envelope.into_data()
    }
}
