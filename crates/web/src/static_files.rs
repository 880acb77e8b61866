//! Static file serving

use std::path::Path;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Serve the console logo from the assets directory.
///
/// Read from disk on every request; purely cosmetic, so a missing file
/// is a 404 rather than an error.
pub async fn serve_logo(assets_dir: &Path) -> Response {
    let path = assets_dir.join("logo.png");
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/png")],
            bytes,
        )
            .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "logo not found").into_response(),
    }
}
