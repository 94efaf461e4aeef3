pub mod auth;
pub mod face;
pub mod media;
pub mod swap;

use crate::error::ApiError;
use serde::Deserialize;

/// Shared response envelope of the face/swap endpoints:
/// `{code, data?, msg?}`.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i64,
    pub data: Option<T>,
    pub msg: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps the payload, surfacing the backend `msg` when `data` is
    /// absent.
    pub fn into_data(self) -> Result<T, ApiError> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(ApiError::EmptyData {
                code: self.code,
                msg: self.msg.unwrap_or_default(),
            }),
        }
    }
}
