use axum::{
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use std::hash::{DefaultHasher, Hash, Hasher};

// Embed static assets at compile time
const STYLE_CSS: &str = include_str!("../../frontend/public/style.css");
const APP_JS: &str = include_str!("../../frontend/public/app.js");
const FAVICON_SVG: &str = include_str!("../../frontend/public/favicon.svg");

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn landing() -> Redirect {
    Redirect::to("/explore")
}

pub async fn serve_css(headers: HeaderMap) -> Response {
    cached_asset(&headers, "text/css", STYLE_CSS)
}

pub async fn serve_js(headers: HeaderMap) -> Response {
    cached_asset(&headers, "application/javascript", APP_JS)
}

pub async fn serve_favicon(headers: HeaderMap) -> Response {
    cached_asset(&headers, "image/svg+xml", FAVICON_SVG)
}

fn asset_etag(body: &str) -> String {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    format!("\"{}-{:016x}\"", env!("CARGO_PKG_VERSION"), hasher.finish())
}

fn cached_asset(headers: &HeaderMap, content_type: &str, body: &'static str) -> Response {
    let etag = asset_etag(body);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match == etag.as_str()
    {
        return StatusCode::NOT_MODIFIED.into_response();
    }

    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CACHE_CONTROL, "no-cache".to_string()),
            (header::ETAG, etag),
        ],
        body,
    )
        .into_response()
}
