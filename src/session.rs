//! Per-browser session context carried in a signed cookie.
//!
//! The context is the only session state the server keeps: whether someone
//! is logged in, who, and which screen they are on. Handlers receive it
//! through the [`SessionContext`] and [`LoggedIn`] extractors.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use crate::constants::SESSION_COOKIE;
use crate::error::{AppError, Result};
use crate::security::{seal, unseal};
use crate::AppState;

/// Screen the session is currently on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Login,
    Menu,
}

/// Session state: `LoggedOut`/`Login` until a successful login, then
/// `LoggedIn`/`Menu` until logout. There is no expiry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user: Option<String>,
    pub screen: Screen,
}

impl SessionContext {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// LoggedOut → LoggedIn
    pub fn login(username: &str) -> Self {
        Self {
            user: Some(username.to_string()),
            screen: Screen::Menu,
        }
    }

    /// LoggedIn → LoggedOut
    pub fn logout(self) -> Self {
        Self::default()
    }

    /// Read the context from the request cookies; a missing, tampered, or
    /// foreign-signed cookie yields the logged-out default.
    pub fn from_jar(jar: &CookieJar, secret: &str) -> Self {
        jar.get(SESSION_COOKIE)
            .and_then(|cookie| unseal(cookie.value(), secret))
            .and_then(|payload| serde_json::from_str(&payload).ok())
            .unwrap_or_default()
    }

    /// Write the context into the jar as a browser-session cookie
    pub fn store(&self, jar: CookieJar, secret: &str) -> Result<CookieJar> {
        let payload = serde_json::to_string(self)?;
        let value = seal(&payload, secret).ok_or(AppError::SessionSigning)?;

        let cookie = Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();

        Ok(jar.add(cookie))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for SessionContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(SessionContext::from_jar(&jar, &state.config.app_secret_key))
    }
}

/// Extractor for pages behind the login screen
#[derive(Debug, Clone)]
pub struct LoggedIn {
    pub username: String,
}

#[async_trait]
impl FromRequestParts<AppState> for LoggedIn {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session = SessionContext::from_jar(&jar, &state.config.app_secret_key);

        match (session.user, session.screen) {
            (Some(username), Screen::Menu) => Ok(LoggedIn { username }),
            _ => Err(AppError::NotLoggedIn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};

    const SECRET: &str = "session-secret";

    fn jar_with(value: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE, value)).unwrap(),
        );
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn test_default_is_logged_out_on_login_screen() {
        let session = SessionContext::default();
        assert!(!session.is_logged_in());
        assert_eq!(session.screen, Screen::Login);
    }

    #[test]
    fn test_login_logout_transitions() {
        let session = SessionContext::login("ana");
        assert!(session.is_logged_in());
        assert_eq!(session.user.as_deref(), Some("ana"));
        assert_eq!(session.screen, Screen::Menu);

        let session = session.logout();
        assert_eq!(session, SessionContext::default());
    }

    #[test]
    fn test_store_and_read_back() {
        let jar = SessionContext::login("ana")
            .store(CookieJar::new(), SECRET)
            .unwrap();
        let value = jar.get(SESSION_COOKIE).unwrap().value().to_string();

        let session = SessionContext::from_jar(&jar_with(&value), SECRET);
        assert_eq!(session, SessionContext::login("ana"));
    }

    #[test]
    fn test_cookie_signed_with_other_secret_is_ignored() {
        let jar = SessionContext::login("ana")
            .store(CookieJar::new(), "other-secret")
            .unwrap();
        let value = jar.get(SESSION_COOKIE).unwrap().value().to_string();

        let session = SessionContext::from_jar(&jar_with(&value), SECRET);
        assert_eq!(session, SessionContext::default());
    }

    #[test]
    fn test_missing_cookie_is_logged_out() {
        let session = SessionContext::from_jar(&CookieJar::new(), SECRET);
        assert_eq!(session, SessionContext::default());
    }
}
