use serde::{Deserialize, Serialize};

/// Success body for a text extraction request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub filename: String,
    pub text: String,
}

impl ExtractResponse {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }
}

/// Body of `GET /auth-info`. Describes how the service is gated without
/// revealing the configured key.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthInfoResponse {
    pub auth_required: bool,
    pub header: String,
    pub dev_mode: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
