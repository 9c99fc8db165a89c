pub mod guestbook;
pub mod upload;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

/// 302 redirect, matching the platform's post-action redirects exactly
/// (axum's `Redirect` helpers emit 303/307).
pub(crate) fn redirect_found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
