//! Cross-origin headers for browser clients
//!
//! The allowed origin mirrors the request's `Origin` header, or `*` when the
//! request did not declare one.

use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";

/// Middleware adding CORS headers to every response
pub async fn cors(req: Request, next: Next) -> Response {
    let origin = req.headers().get(header::ORIGIN).cloned();
    let mut response = next.run(req).await;
    apply_cors_headers(response.headers_mut(), origin);
    response
}

pub fn apply_cors_headers(headers: &mut HeaderMap, origin: Option<HeaderValue>) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        origin.unwrap_or_else(|| HeaderValue::from_static("*")),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirrors_origin() {
        let mut headers = HeaderMap::new();
        apply_cors_headers(
            &mut headers,
            Some(HeaderValue::from_static("https://app.example.com")),
        );
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://app.example.com"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], ALLOW_METHODS);
    }

    #[test]
    fn test_wildcard_without_origin() {
        let mut headers = HeaderMap::new();
        apply_cors_headers(&mut headers, None);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], ALLOW_HEADERS);
    }
}
