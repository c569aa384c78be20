//! Request header parsing

use axum::http::{HeaderMap, header};

pub const SUBMISSION_ID_HEADER: &str = "x-submission-id";
pub const SIGNATURE_HEADER: &str = "x-signature";

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = header_str(headers, header::AUTHORIZATION.as_str())?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim()).filter(|t| !t.is_empty())
}

pub fn submission_id(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, SUBMISSION_ID_HEADER)
}

pub fn signature(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, SIGNATURE_HEADER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer  tok "));
        assert_eq!(bearer_token(&headers), Some("tok"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_submission_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(SUBMISSION_ID_HEADER, HeaderValue::from_static(" id-1 "));
        headers.insert(SIGNATURE_HEADER, HeaderValue::from_static(""));
        assert_eq!(submission_id(&headers), Some("id-1"));
        assert_eq!(signature(&headers), None);
    }
}
