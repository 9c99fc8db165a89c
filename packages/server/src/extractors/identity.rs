use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use platform::identity::Principal;

use crate::error::AppError;
use crate::state::AppState;

/// The current principal if the request carries one. Never rejects.
///
/// Add this as a handler parameter when identity is optional.
pub struct MaybePrincipal(pub Option<Principal>);

/// The current principal; anonymous requests are rejected with
/// `AuthRequired`.
pub struct RequirePrincipal(pub Principal);

impl<S> FromRequestParts<S> for MaybePrincipal
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        Ok(Self(state.identity.current(&parts.headers)))
    }
}

impl<S> FromRequestParts<S> for RequirePrincipal
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let MaybePrincipal(principal) = MaybePrincipal::from_request_parts(parts, state).await?;
        principal.map(Self).ok_or(AppError::AuthRequired)
    }
}
