//! HTTP rendering of [`AppError`]
//!
//! Every rejection leaves the service as `{"error": "<message>"}`.

#[cfg(feature = "axum")]
use super::app_error::AppError;

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // the cause chain stays in the logs
        (status, Json(serde_json::json!({ "error": self.message() }))).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    async fn render(err: AppError) -> (u16, serde_json::Value) {
        let response = err.into_response();
        let status = response.status().as_u16();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_body_carries_only_the_message() {
        let (status, body) = render(AppError::unauthorized("Invalid signature")).await;
        assert_eq!(status, 401);
        assert_eq!(body, serde_json::json!({ "error": "Invalid signature" }));
    }

    #[tokio::test]
    async fn test_cause_is_not_rendered() {
        let cause = std::io::Error::other("connection refused by 10.0.0.5");
        let (status, body) = render(AppError::internal("Storage error").with_source(cause)).await;
        assert_eq!(status, 500);
        assert!(!body.to_string().contains("10.0.0.5"));
    }
}
