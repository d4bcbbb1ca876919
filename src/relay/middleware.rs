// CORS middleware
//
// The relay is called straight from browsers on other origins. Preflights get
// an empty 200; every other response carries the same permissive headers.

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Headers browser clients of the relay are known to send
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type, \
x-supabase-client-platform, x-supabase-client-platform-version, \
x-supabase-client-runtime, x-supabase-client-runtime-version";

pub async fn cors_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        tracing::trace!(uri = %request.uri(), "CORS preflight");
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    apply_cors_headers(response.headers_mut());
    response
}

pub fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
}
