pub mod auth_service;
pub mod legacy_swap_service;
pub mod swap_service;

pub use auth_service::{AuthService, AuthServiceImpl};
pub use legacy_swap_service::{LegacySwapService, LegacySwapServiceImpl};
pub use swap_service::{SwapService, SwapServiceImpl};

use crate::error::ApiError;
use reqwest::multipart::{Form, Part};

/// Builds the single-field multipart form the upload endpoints expect.
pub(crate) fn file_form(
    bytes: Vec<u8>,
    filename: &str,
    content_type: &str,
) -> Result<Form, ApiError> {
    let part = Part::bytes(bytes)
        .file_name(filename.to_string())
        .mime_str(content_type)?;
    Ok(Form::new().part("file", part))
}
