use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use super::{load_entries, render_with_error};
use crate::constants::{ERR_INVALID_KIND, ERR_MISSING_FIELDS, MSG_ENTRY_DELETED, MSG_ENTRY_UPDATED};
use crate::error::{AppError, Result};
use crate::models::entry::{parse_amount, parse_form_date, parse_installments, DATE_FORMAT};
use crate::models::{EntryKind, LedgerEntry};
use crate::session::LoggedIn;
use crate::views::{self, Notice};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct EntriesQuery {
    pub index: Option<usize>,
}

/// Replacement values for one row. The subtype is free text here, unlike the
/// create forms, and dollar rows are not converted again.
#[derive(Debug, Deserialize)]
pub struct EditForm {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub subtype: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub installments: String,
    pub foreign: Option<String>,
}

impl EditForm {
    fn into_entry(self) -> Result<LedgerEntry> {
        let kind = EntryKind::from_label(self.kind.trim())
            .ok_or_else(|| AppError::InvalidInput(ERR_INVALID_KIND.to_string()))?;
        if self.subtype.trim().is_empty() {
            return Err(AppError::InvalidInput(ERR_MISSING_FIELDS.to_string()));
        }
        let date = parse_form_date(&self.date)?;

        Ok(LedgerEntry {
            kind,
            subtype: self.subtype.trim().to_string(),
            date: date.format(DATE_FORMAT).to_string(),
            amount: parse_amount(&self.amount)?,
            reference: self.reference,
            installments: parse_installments(&self.installments)?,
            foreign_currency: self.foreign.is_some(),
        })
    }
}

/// All rows with their positional index, plus the editor for `index`
pub async fn list_entries(
    State(state): State<AppState>,
    user: LoggedIn,
    Query(query): Query<EntriesQuery>,
) -> Result<Html<String>> {
    let entries = load_entries(&state, &user.username).await?;

    if let Some(index) = query.index {
        if index >= entries.len() {
            return Err(AppError::EntryNotFound);
        }
    }

    Ok(Html(views::entries_page(
        &user.username,
        &entries,
        query.index,
        None,
    )))
}

/// Replace the row at `index` in place
pub async fn edit_entry(
    State(state): State<AppState>,
    user: LoggedIn,
    Path(index): Path<usize>,
    Form(form): Form<EditForm>,
) -> Result<Response> {
    let outcome = match form.into_entry() {
        Ok(entry) => {
            let ledger = state.storage.ledger(&user.username);
            tokio::task::spawn_blocking(move || ledger.edit_at(index, entry)).await?
        }
        Err(err) => Err(err),
    };

    let entries = load_entries(&state, &user.username).await?;
    match outcome {
        Ok(()) => {
            tracing::info!("Edited entry {} for user {}", index, user.username);
            let notice = Notice::Success(MSG_ENTRY_UPDATED.to_string());
            Ok(Html(views::entries_page(&user.username, &entries, Some(index), Some(&notice)))
                .into_response())
        }
        Err(err) => {
            let selected = (index < entries.len()).then_some(index);
            render_with_error(err, |notice| {
                views::entries_page(&user.username, &entries, selected, Some(notice))
            })
        }
    }
}

/// Remove the row at `index`; later rows shift down by one
pub async fn delete_entry(
    State(state): State<AppState>,
    user: LoggedIn,
    Path(index): Path<usize>,
) -> Result<Response> {
    let ledger = state.storage.ledger(&user.username);
    let outcome = tokio::task::spawn_blocking(move || ledger.delete_at(index)).await?;

    let entries = load_entries(&state, &user.username).await?;
    match outcome {
        Ok(removed) => {
            tracing::info!(
                "Deleted entry {} ({} {}) for user {}",
                index,
                removed.kind.label(),
                removed.amount,
                user.username
            );
            let notice = Notice::Success(MSG_ENTRY_DELETED.to_string());
            Ok(Html(views::entries_page(&user.username, &entries, None, Some(&notice)))
                .into_response())
        }
        Err(err) => render_with_error(err, |notice| {
            views::entries_page(&user.username, &entries, None, Some(notice))
        }),
    }
}
