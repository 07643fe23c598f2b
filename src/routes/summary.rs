use axum::{
    extract::{Query, State},
    response::Html,
};
use chrono::Datelike;
use serde::Deserialize;

use super::{load_entries, parse_query_number, today};
use crate::constants::{ERR_INVALID_MONTH, ERR_INVALID_YEAR};
use crate::error::{AppError, Result};
use crate::models::summary::{filter_entries, summarize};
use crate::models::Period;
use crate::session::LoggedIn;
use crate::views;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    pub month: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnnualQuery {
    pub year: Option<String>,
}

/// Totals and rows for one calendar month; defaults to the current month
pub async fn monthly_summary(
    State(state): State<AppState>,
    user: LoggedIn,
    Query(query): Query<MonthlyQuery>,
) -> Result<Html<String>> {
    let now = today();
    let month = parse_query_number(query.month.as_deref(), now.month(), ERR_INVALID_MONTH)?;
    let year = parse_query_number(query.year.as_deref(), now.year(), ERR_INVALID_YEAR)?;

    if !(1..=12).contains(&month) {
        return Err(AppError::InvalidInput(ERR_INVALID_MONTH.to_string()));
    }

    let entries = load_entries(&state, &user.username).await?;
    let period = Period::Month { year, month };
    let summary = summarize(&entries, |date| period.contains(date))?;
    let rows = filter_entries(&entries, |date| period.contains(date));

    Ok(Html(views::monthly_summary_page(
        &user.username,
        month,
        year,
        &summary,
        &rows,
    )))
}

/// Totals and rows for one calendar year; defaults to the current year
pub async fn annual_summary(
    State(state): State<AppState>,
    user: LoggedIn,
    Query(query): Query<AnnualQuery>,
) -> Result<Html<String>> {
    let year = parse_query_number(query.year.as_deref(), today().year(), ERR_INVALID_YEAR)?;

    let entries = load_entries(&state, &user.username).await?;
    let period = Period::Year(year);
    let summary = summarize(&entries, |date| period.contains(date))?;
    let rows = filter_entries(&entries, |date| period.contains(date));

    Ok(Html(views::annual_summary_page(
        &user.username,
        year,
        &summary,
        &rows,
    )))
}
