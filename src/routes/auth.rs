use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::render_with_error;
use crate::db::{remembered, users};
use crate::error::Result;
use crate::models::RememberedCredential;
use crate::session::{LoggedIn, Screen, SessionContext};
use crate::views;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Checkbox; present only when checked
    pub remember: Option<String>,
}

/// Login screen, pre-filled with the remembered credentials
///
/// Sessions already on the menu screen are sent straight to it.
pub async fn login_page(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Response> {
    if session.is_logged_in() && session.screen == Screen::Menu {
        return Ok(Redirect::to("/menu").into_response());
    }

    let storage = state.storage.clone();
    let prefill = tokio::task::spawn_blocking(move || remembered::load(&storage)).await??;

    Ok(Html(views::login_page(&prefill, None)).into_response())
}

/// Check credentials and move the session to the menu screen
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let storage = state.storage.clone();
    let username = form.username.clone();
    let password = form.password.clone();
    let remember = form.remember.is_some();

    let outcome = tokio::task::spawn_blocking(move || -> Result<()> {
        users::authenticate(&storage, &username, &password)?;
        if remember {
            remembered::save(&storage, &username, &password)?;
        }
        Ok(())
    })
    .await?;

    if let Err(err) = outcome {
        let prefill = RememberedCredential {
            username: form.username,
            password: String::new(),
        };
        return render_with_error(err, |notice| views::login_page(&prefill, Some(notice)));
    }

    let jar = SessionContext::login(&form.username).store(jar, &state.config.app_secret_key)?;
    tracing::info!("User logged in: {}", form.username);

    Ok((jar, Redirect::to("/menu")).into_response())
}

/// Return the session to the login screen
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    session: SessionContext,
) -> Result<Response> {
    if let Some(username) = &session.user {
        tracing::info!("User logged out: {}", username);
    }

    let jar = session.logout().store(jar, &state.config.app_secret_key)?;
    Ok((jar, Redirect::to("/")).into_response())
}

pub async fn menu(user: LoggedIn) -> Html<String> {
    Html(views::menu_page(&user.username))
}
