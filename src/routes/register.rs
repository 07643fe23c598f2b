use axum::{
    extract::State,
    response::{Html, Response},
    Form,
};
use serde::Deserialize;

use super::respond_with_notice;
use crate::constants::MSG_REGISTERED;
use crate::db::users;
use crate::error::Result;
use crate::views;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn register_page() -> Html<String> {
    Html(views::register_page(None))
}

/// Register a new user
///
/// Appends a row to the credential table. Empty fields are a 400, a taken
/// username is a 409; both are shown on the registration form. Passwords are
/// stored as entered.
pub async fn register_user(
    State(state): State<AppState>,
    Form(payload): Form<RegisterForm>,
) -> Result<Response> {
    let storage = state.storage.clone();

    let outcome = tokio::task::spawn_blocking(move || {
        users::register(&storage, &payload.username, &payload.password)
    })
    .await?;

    respond_with_notice(outcome, MSG_REGISTERED, |notice| {
        views::register_page(Some(notice))
    })
}
