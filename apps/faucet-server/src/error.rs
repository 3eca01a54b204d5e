// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::blockchain::IssueError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

/// Error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Short reason for the failure
    pub msg: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

}

impl From<IssueError> for ApiError {
    fn from(err: IssueError) -> Self {
        Self::new(err.status_code(), err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody { msg: self.message });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{AddressError, NodeError};
    use axum::body::to_bytes;

    #[test]
    fn issue_errors_map_to_status_without_node_detail() {
        let invalid: ApiError = IssueError::InvalidRecipient(AddressError::InvalidLength).into();
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
        assert_eq!(invalid.message, "invalid address format");

        let nonce: ApiError =
            IssueError::NonceFetchFailed(NodeError::Rpc("http://10.0.0.7:8551 refused".into()))
                .into();
        assert_eq!(nonce.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(nonce.message, "failed to get a pending nonce");
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response: Response =
            ApiError::from(IssueError::InvalidRecipient(AddressError::InvalidLength))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"msg":"invalid address format"}"#);
    }
}
