use axum::{
    extract::Request,
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The one protocol version this API speaks. Requests either omit the
/// Accept-Version header or ask for exactly this value.
const SUPPORTED_VERSION: &str = "1.0";

/// Refuses requests negotiating an unsupported API version (406) and
/// write requests that do not declare a JSON body (415).
pub async fn check_headers(request: Request, next: Next) -> Response {
    if let Some(version) = request.headers().get("accept-version") {
        if version.to_str().ok() != Some(SUPPORTED_VERSION) {
            return (
                StatusCode::NOT_ACCEPTABLE,
                "Accept-Version cannot be fulfilled",
            )
                .into_response();
        }
    }

    if matches!(request.method(), &Method::POST | &Method::PUT) {
        let is_json = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);
        if !is_json {
            return (StatusCode::UNSUPPORTED_MEDIA_TYPE, "wrong Content-Type").into_response();
        }
    }

    next.run(request).await
}
