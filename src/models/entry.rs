use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{AppError, Result};

/// Storage format for dates written by the server
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Income or expense, stored as `Ingreso` / `Gasto`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    #[serde(rename = "Ingreso")]
    Income,
    #[serde(rename = "Gasto")]
    Expense,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Income => "Ingreso",
            EntryKind::Expense => "Gasto",
        }
    }

    /// Subtypes the create forms accept for this kind
    pub fn subtypes(&self) -> &'static [&'static str] {
        match self {
            EntryKind::Income => &INCOME_SUBTYPES,
            EntryKind::Expense => &EXPENSE_SUBTYPES,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Ingreso" => Some(EntryKind::Income),
            "Gasto" => Some(EntryKind::Expense),
            _ => None,
        }
    }
}

/// One row of a user's ledger file
///
/// Field renames are the on-disk column names. The date is kept as the raw
/// cell text so rows with unparseable dates survive a rewrite untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(rename = "tipo")]
    pub kind: EntryKind,
    #[serde(rename = "subtipo", default)]
    pub subtype: String,
    #[serde(rename = "fecha", default)]
    pub date: String,
    #[serde(rename = "monto", with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(rename = "referencia", default)]
    pub reference: String,
    #[serde(rename = "cuotas")]
    pub installments: u32,
    #[serde(rename = "dolares", with = "title_case_bool")]
    pub foreign_currency: bool,
}

impl LedgerEntry {
    /// Income rows always have a single installment and are never foreign
    pub fn income(subtype: &str, date: NaiveDate, amount: Decimal, reference: &str) -> Self {
        Self {
            kind: EntryKind::Income,
            subtype: subtype.to_string(),
            date: date.format(DATE_FORMAT).to_string(),
            amount,
            reference: reference.to_string(),
            installments: 1,
            foreign_currency: false,
        }
    }

    pub fn expense(
        subtype: &str,
        date: NaiveDate,
        amount: Decimal,
        reference: &str,
        installments: u32,
        foreign_currency: bool,
    ) -> Self {
        Self {
            kind: EntryKind::Expense,
            subtype: subtype.to_string(),
            date: date.format(DATE_FORMAT).to_string(),
            amount,
            reference: reference.to_string(),
            installments,
            foreign_currency,
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Replace the foreign amount with its local value. The original foreign
    /// amount is not kept. Fails, leaving the row untouched, when the converted
    /// amount would exceed [`MAX_AMOUNT`].
    pub fn convert_with_rate(&mut self, rate: Decimal) -> Result<()> {
        let converted = self
            .amount
            .checked_mul(rate)
            .filter(|amount| *amount <= MAX_AMOUNT)
            .ok_or_else(|| AppError::InvalidInput(ERR_AMOUNT_TOO_LARGE.to_string()))?;

        self.amount = converted;
        Ok(())
    }
}

/// Parse the date formats found in existing ledger files
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    for fmt in [DATE_FORMAT, "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }

    for fmt in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(datetime.date());
        }
    }

    None
}

/// Validate a form date (`YYYY-MM-DD`, as sent by date inputs)
pub fn parse_form_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| AppError::InvalidInput(ERR_INVALID_DATE.to_string()))
}

/// Validate a decimal amount in `0..=MAX_AMOUNT`
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let amount = Decimal::from_str(raw.trim())
        .map_err(|_| AppError::InvalidInput(ERR_INVALID_AMOUNT.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AppError::InvalidInput(ERR_INVALID_AMOUNT.to_string()));
    }
    if amount > MAX_AMOUNT {
        return Err(AppError::InvalidInput(ERR_AMOUNT_TOO_LARGE.to_string()));
    }

    Ok(amount)
}

pub fn parse_installments(raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(AppError::InvalidInput(ERR_INVALID_INSTALLMENTS.to_string())),
    }
}

/// Check a create-form subtype against the fixed list for its kind
pub fn validate_subtype(kind: EntryKind, subtype: &str) -> Result<()> {
    if kind.subtypes().contains(&subtype) {
        Ok(())
    } else {
        Err(AppError::InvalidInput(ERR_INVALID_SUBTYPE.to_string()))
    }
}

/// `dolares` column: written as `True`/`False`, read leniently
mod title_case_bool {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "True" } else { "False" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim() {
            "True" | "true" | "TRUE" | "1" => Ok(true),
            "False" | "false" | "FALSE" | "0" | "" => Ok(false),
            other => Err(D::Error::custom(format!("invalid boolean: {}", other))),
        }
    }
}
