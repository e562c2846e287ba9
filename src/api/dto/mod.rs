//! API DTOs shared by every controller

pub mod paginated_response;
pub mod table_query_dto;
pub mod window_dto;

use serde::Serialize;
use serde_with::skip_serializing_none;

/// Envelope wrapping every JSON response.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub is_successful: bool,
    pub data: Option<T>,
    pub error_msg: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            is_successful: true,
            data: Some(data),
            error_msg: None,
        }
    }

    pub fn err<S: Into<String>>(msg: S) -> Self {
        Self {
            is_successful: false,
            data: None,
            error_msg: Some(msg.into()),
        }
    }
}
