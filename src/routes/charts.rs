use axum::{
    extract::{Query, State},
    response::Html,
};
use chrono::Datelike;
use serde::Deserialize;

use super::{load_entries, parse_query_number, today};
use crate::constants::ERR_INVALID_YEAR;
use crate::error::Result;
use crate::models::summary::{expense_by_subtype, monthly_totals};
use crate::models::Period;
use crate::session::LoggedIn;
use crate::views;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChartsQuery {
    pub year: Option<String>,
}

/// Monthly income/expense bars and expense per subtype for one year
pub async fn charts(
    State(state): State<AppState>,
    user: LoggedIn,
    Query(query): Query<ChartsQuery>,
) -> Result<Html<String>> {
    let year = parse_query_number(query.year.as_deref(), today().year(), ERR_INVALID_YEAR)?;

    let entries = load_entries(&state, &user.username).await?;
    let months = monthly_totals(&entries, year)?;
    let by_subtype = expense_by_subtype(&entries, Period::Year(year))?;

    Ok(Html(views::charts_page(
        &user.username,
        year,
        &months,
        &by_subtype,
    )))
}
