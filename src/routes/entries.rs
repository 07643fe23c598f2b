use axum::{
    extract::State,
    response::{Html, Response},
    Form,
};
use serde::Deserialize;

use super::{render_with_error, respond_with_notice, today};
use crate::constants::{MSG_EXPENSE_SAVED, MSG_INCOME_SAVED};
use crate::error::{AppError, Result};
use crate::models::entry::{parse_amount, parse_form_date, parse_installments, validate_subtype};
use crate::models::{EntryKind, LedgerEntry};
use crate::session::LoggedIn;
use crate::views;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct IncomeForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub subtype: String,
    #[serde(default)]
    pub reference: String,
}

impl IncomeForm {
    fn into_entry(self) -> Result<LedgerEntry> {
        let date = parse_form_date(&self.date)?;
        let amount = parse_amount(&self.amount)?;
        validate_subtype(EntryKind::Income, &self.subtype)?;

        Ok(LedgerEntry::income(&self.subtype, date, amount, &self.reference))
    }
}

#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub subtype: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub installments: String,
    /// Checkbox; present only when checked
    pub foreign: Option<String>,
}

impl ExpenseForm {
    fn into_entry(self) -> Result<LedgerEntry> {
        let date = parse_form_date(&self.date)?;
        let amount = parse_amount(&self.amount)?;
        validate_subtype(EntryKind::Expense, &self.subtype)?;
        let installments = parse_installments(&self.installments)?;

        Ok(LedgerEntry::expense(
            &self.subtype,
            date,
            amount,
            &self.reference,
            installments,
            self.foreign.is_some(),
        ))
    }
}

pub async fn income_page(user: LoggedIn) -> Html<String> {
    Html(views::income_page(&user.username, today(), None))
}

pub async fn expense_page(user: LoggedIn) -> Html<String> {
    Html(views::expense_page(&user.username, today(), None))
}

/// Append an income row to the user's ledger
pub async fn record_income(
    State(state): State<AppState>,
    user: LoggedIn,
    Form(form): Form<IncomeForm>,
) -> Result<Response> {
    let render = |notice: &views::Notice| views::income_page(&user.username, today(), Some(notice));

    let entry = match form.into_entry() {
        Ok(entry) => entry,
        Err(err) => return render_with_error(err, render),
    };

    let outcome = append_entry(&state, &user.username, entry).await;
    respond_with_notice(outcome, MSG_INCOME_SAVED, render)
}

/// Append an expense row to the user's ledger
///
/// Dollar expenses are converted to local currency before they are stored,
/// using the card rate. When no rate can be fetched nothing is written.
pub async fn record_expense(
    State(state): State<AppState>,
    user: LoggedIn,
    Form(form): Form<ExpenseForm>,
) -> Result<Response> {
    let render =
        |notice: &views::Notice| views::expense_page(&user.username, today(), Some(notice));

    let mut entry = match form.into_entry() {
        Ok(entry) => entry,
        Err(err) => return render_with_error(err, render),
    };

    if entry.foreign_currency {
        match state.rates.fetch_card_rate().await {
            Some(rate) => {
                tracing::debug!("Converting {} USD at card rate {}", entry.amount, rate);
                if let Err(err) = entry.convert_with_rate(rate) {
                    return render_with_error(err, render);
                }
            }
            None => return render_with_error(AppError::ExchangeRateUnavailable, render),
        }
    }

    let outcome = append_entry(&state, &user.username, entry).await;
    respond_with_notice(outcome, MSG_EXPENSE_SAVED, render)
}

async fn append_entry(state: &AppState, username: &str, entry: LedgerEntry) -> Result<()> {
    let ledger = state.storage.ledger(username);
    let index = tokio::task::spawn_blocking(move || ledger.append(entry)).await??;

    tracing::info!("Stored entry {} for user {}", index, username);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn expense_form(amount: &str, subtype: &str, installments: &str) -> ExpenseForm {
        ExpenseForm {
            date: "2024-05-10".to_string(),
            amount: amount.to_string(),
            subtype: subtype.to_string(),
            reference: "super".to_string(),
            installments: installments.to_string(),
            foreign: None,
        }
    }

    #[test]
    fn test_income_form_builds_single_installment_row() {
        let form = IncomeForm {
            date: "2024-05-01".to_string(),
            amount: "1000".to_string(),
            subtype: "Fijo".to_string(),
            reference: "sueldo".to_string(),
        };

        let entry = form.into_entry().unwrap();
        assert_eq!(entry.kind, EntryKind::Income);
        assert_eq!(entry.amount, Decimal::new(1000, 0));
        assert_eq!(entry.installments, 1);
        assert!(!entry.foreign_currency);
        assert_eq!(entry.date, "2024-05-01");
    }

    #[test]
    fn test_income_form_rejects_expense_subtype() {
        let form = IncomeForm {
            date: "2024-05-01".to_string(),
            amount: "10".to_string(),
            subtype: "Tarjeta".to_string(),
            reference: String::new(),
        };

        assert!(matches!(form.into_entry(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_expense_form_validation() {
        assert!(expense_form("250.50", "Tarjeta", "3").into_entry().is_ok());
        assert!(expense_form("-1", "Tarjeta", "1").into_entry().is_err());
        assert!(expense_form("10", "Tarjeta", "0").into_entry().is_err());
        assert!(expense_form("10", "Fijo", "1").into_entry().is_err());
        assert!(expense_form("abc", "Tarjeta", "1").into_entry().is_err());
    }

    #[test]
    fn test_expense_form_foreign_flag() {
        let mut form = expense_form("100", "Gasto Vario", "1");
        form.foreign = Some("on".to_string());

        let entry = form.into_entry().unwrap();
        assert!(entry.foreign_currency);
        assert_eq!(entry.amount, Decimal::new(100, 0));
    }
}
