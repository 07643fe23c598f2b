pub mod auth;
pub mod charts;
pub mod entries;
pub mod health;
pub mod records;
pub mod register;
pub mod summary;

use axum::{
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use std::str::FromStr;
use tower_http::trace::TraceLayer;

use crate::error::{AppError, Result};
use crate::models::LedgerEntry;
use crate::views::Notice;
use crate::AppState;

pub use auth::{login, login_page, logout, menu};
pub use charts::charts;
pub use entries::{expense_page, income_page, record_expense, record_income};
pub use health::health_check;
pub use records::{delete_entry, edit_entry, list_entries};
pub use register::{register_page, register_user};
pub use summary::{annual_summary, monthly_summary};

/// Build the application router
pub fn router(state: AppState) -> Router {
    let log_requests = state.config.log_requests;

    let app = Router::new()
        .route("/", get(login_page))
        .route("/login", post(login))
        .route("/register", get(register_page).post(register_user))
        .route("/logout", post(logout))
        .route("/menu", get(menu))
        .route("/income", get(income_page).post(record_income))
        .route("/expense", get(expense_page).post(record_expense))
        .route("/summary/monthly", get(monthly_summary))
        .route("/summary/annual", get(annual_summary))
        .route("/entries", get(list_entries))
        .route("/entries/:index", post(edit_entry))
        .route("/entries/:index/delete", post(delete_entry))
        .route("/charts", get(charts))
        .route("/health", get(health_check))
        .with_state(state);

    if log_requests {
        app.layer(TraceLayer::new_for_http())
    } else {
        app
    }
}

/// Local calendar date used as the default for forms and summaries
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Numeric query parameter sent by a form input; blank means `default`
pub(crate) fn parse_query_number<T: FromStr>(
    raw: Option<&str>,
    default: T,
    message: &str,
) -> Result<T> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| AppError::InvalidInput(message.to_string())),
    }
}

/// Load a user's ledger off the async runtime
pub(crate) async fn load_entries(state: &AppState, username: &str) -> Result<Vec<LedgerEntry>> {
    let ledger = state.storage.ledger(username);
    tokio::task::spawn_blocking(move || ledger.list_all()).await?
}

/// Show a user-facing error on the page it came from; server errors and
/// missing sessions propagate to the generic handling in `AppError`.
pub(crate) fn render_with_error<F>(err: AppError, render: F) -> Result<Response>
where
    F: FnOnce(&Notice) -> String,
{
    if err.is_internal() || matches!(err, AppError::NotLoggedIn) {
        return Err(err);
    }

    let (status, message) = err.status_and_message();
    let notice = Notice::Error(message.to_string());
    Ok((status, Html(render(&notice))).into_response())
}

/// Render the page with a success notice, or with the error inline
pub(crate) fn respond_with_notice<F>(
    outcome: Result<()>,
    success: &str,
    render: F,
) -> Result<Response>
where
    F: FnOnce(&Notice) -> String,
{
    match outcome {
        Ok(()) => Ok(Html(render(&Notice::Success(success.to_string()))).into_response()),
        Err(err) => render_with_error(err, render),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_number() {
        assert_eq!(parse_query_number(None, 2024, "año").unwrap(), 2024);
        assert_eq!(parse_query_number(Some(""), 2024, "año").unwrap(), 2024);
        assert_eq!(parse_query_number(Some(" 2023 "), 2024, "año").unwrap(), 2023);

        match parse_query_number::<i32>(Some("dos mil"), 2024, "año") {
            Err(AppError::InvalidInput(msg)) => assert_eq!(msg, "año"),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }
}
