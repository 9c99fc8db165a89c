use askama::Template;
use axum::Form;
use axum::extract::State;
use axum::response::{Html, Response};
use chrono::Utc;
use platform::datastore::Query;
use serde::Deserialize;
use tracing::instrument;

use crate::entity::greeting::{GREETING_KIND, Greeting, guestbook_key};
use crate::error::AppError;
use crate::extractors::identity::MaybePrincipal;
use crate::state::AppState;
use crate::templates::GuestbookPage;

use super::redirect_found;

/// Render the ten most recent greetings and the signing form.
#[instrument(skip(state))]
pub async fn show_guestbook(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let query = Query::new(GREETING_KIND)
        .ancestor(guestbook_key())
        .order_desc("Date")
        .limit(10);
    let entities = state.datastore.run(query).await?;

    let page = GuestbookPage {
        greetings: entities.iter().map(Greeting::from_entity).collect(),
    };
    Ok(Html(page.render()?))
}

#[derive(Debug, Deserialize)]
pub struct SignForm {
    #[serde(default)]
    pub content: String,
}

/// Persist a new greeting and bounce back to the guestbook. The content is
/// stored exactly as submitted; empty submissions are accepted.
#[instrument(skip(state, principal, form))]
pub async fn sign_guestbook(
    State(state): State<AppState>,
    MaybePrincipal(principal): MaybePrincipal,
    Form(form): Form<SignForm>,
) -> Result<Response, AppError> {
    let greeting = Greeting {
        author: principal.map(|p| p.to_string()).unwrap_or_default(),
        content: form.content,
        date: Utc::now(),
    };
    state.datastore.put(greeting.to_entity()).await?;

    Ok(redirect_found("/"))
}
