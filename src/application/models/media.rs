use serde::Deserialize;

/// Response of the multipart upload endpoints: the stored object's public
/// URL and storage key, plus file metadata on the media endpoint.
#[derive(Debug, Deserialize)]
pub struct MediaUpload {
    pub url: String,
    pub key: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub size: Option<u64>,
}
