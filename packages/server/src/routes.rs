use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::guestbook::show_guestbook))
        .route("/sign", post(handlers::guestbook::sign_guestbook))
        .route("/root", get(handlers::upload::upload_page))
        .route(
            "/upload",
            post(handlers::upload::complete_upload).layer(handlers::upload::upload_body_limit()),
        )
}
