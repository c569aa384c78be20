//! Unit tests for Auth crate

#[cfg(test)]
mod config_tests {
    use crate::application::config::*;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.token_ttl, Duration::from_secs(60));
        assert_eq!(config.token_ttl_secs(), 60);
        assert_eq!(config.leeway_secs, 0);
    }

    #[test]
    fn test_development_secrets_differ() {
        let a = AuthConfig::development();
        let b = AuthConfig::development();
        assert_eq!(a.secret.len(), 32);
        assert_ne!(a.secret, b.secret);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig::with_secret(b"hunter2".to_vec());
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use kernel::error::app_error::AppError;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases = vec![
            (AuthError::MissingToken, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidToken, StatusCode::UNAUTHORIZED),
            (AuthError::TokenExpired, StatusCode::UNAUTHORIZED),
            (AuthError::MissingSubmissionId, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidSubmissionId, StatusCode::UNAUTHORIZED),
            (AuthError::NonceMismatch, StatusCode::UNAUTHORIZED),
            (
                AuthError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status);
            assert_eq!(AppError::from(error).into_response().status(), expected_status);
        }
    }

    #[tokio::test]
    async fn test_internal_detail_not_exposed() {
        let response = AppError::from(AuthError::Internal("key material".into())).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_missing_header_message() {
        let response = AppError::from(AuthError::MissingToken).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Missing Authorization header");
    }
}
