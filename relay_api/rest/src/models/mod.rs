use serde::Serialize;

pub mod contact;

/// Uniform body of every json response.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: &'static str,
}

impl ApiResponse {
    pub fn ok(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }

    pub fn error(message: &'static str) -> Self {
        Self {
            success: false,
            message,
        }
    }
}
