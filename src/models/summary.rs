use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::entry::{EntryKind, LedgerEntry};
use crate::constants::ERR_TOTALS_OVERFLOW;
use crate::error::{AppError, Result};

/// Time window a summary is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Month { year: i32, month: u32 },
    Year(i32),
}

impl Period {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Period::Month { year, month } => date.year() == year && date.month() == month,
            Period::Year(year) => date.year() == year,
        }
    }
}

/// Totals for one filtered set of rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

/// Income and expense for one calendar month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

/// Rows whose parsed date satisfies `predicate`, paired with their positional
/// index. Rows with unparseable dates are dropped.
pub fn filter_entries<F>(entries: &[LedgerEntry], predicate: F) -> Vec<(usize, &LedgerEntry)>
where
    F: Fn(NaiveDate) -> bool,
{
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.parsed_date().is_some_and(&predicate))
        .collect()
}

/// `total + amount`, or an inline error when the sum leaves the decimal range
fn accumulate(total: &mut Decimal, amount: Decimal) -> Result<()> {
    *total = total
        .checked_add(amount)
        .ok_or_else(|| AppError::InvalidInput(ERR_TOTALS_OVERFLOW.to_string()))?;
    Ok(())
}

/// Sum amounts by kind over the rows selected by `predicate`
pub fn summarize<F>(entries: &[LedgerEntry], predicate: F) -> Result<Summary>
where
    F: Fn(NaiveDate) -> bool,
{
    let mut summary = Summary::default();

    for (_, entry) in filter_entries(entries, predicate) {
        match entry.kind {
            EntryKind::Income => accumulate(&mut summary.total_income, entry.amount)?,
            EntryKind::Expense => accumulate(&mut summary.total_expense, entry.amount)?,
        }
    }

    summary.balance = summary
        .total_income
        .checked_sub(summary.total_expense)
        .ok_or_else(|| AppError::InvalidInput(ERR_TOTALS_OVERFLOW.to_string()))?;
    Ok(summary)
}

/// Twelve buckets (January first) of income and expense for `year`
pub fn monthly_totals(entries: &[LedgerEntry], year: i32) -> Result<[MonthTotals; 12]> {
    let mut months = [MonthTotals::default(); 12];

    for entry in entries {
        let Some(date) = entry.parsed_date() else {
            continue;
        };
        if date.year() != year {
            continue;
        }

        let bucket = &mut months[date.month0() as usize];
        match entry.kind {
            EntryKind::Income => accumulate(&mut bucket.income, entry.amount)?,
            EntryKind::Expense => accumulate(&mut bucket.expense, entry.amount)?,
        }
    }

    Ok(months)
}

/// Expense total per subtype inside `period`, sorted by subtype
pub fn expense_by_subtype(
    entries: &[LedgerEntry],
    period: Period,
) -> Result<Vec<(String, Decimal)>> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();

    for (_, entry) in filter_entries(entries, |date| period.contains(date)) {
        if entry.kind == EntryKind::Expense {
            accumulate(totals.entry(entry.subtype.clone()).or_default(), entry.amount)?;
        }
    }

    Ok(totals.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(kind: EntryKind, subtype: &str, date: &str, amount: i64) -> LedgerEntry {
        LedgerEntry {
            kind,
            subtype: subtype.to_string(),
            date: date.to_string(),
            amount: Decimal::new(amount, 0),
            reference: String::new(),
            installments: 1,
            foreign_currency: false,
        }
    }

    fn march_2024() -> Period {
        Period::Month {
            year: 2024,
            month: 3,
        }
    }

    #[test]
    fn test_monthly_summary_example() {
        let entries = vec![
            row(EntryKind::Income, "Fijo", "2024-03-05", 1000),
            row(EntryKind::Expense, "Tarjeta", "2024-03-20", 400),
        ];

        let summary = summarize(&entries, |d| march_2024().contains(d)).unwrap();

        assert_eq!(summary.total_income, Decimal::new(1000, 0));
        assert_eq!(summary.total_expense, Decimal::new(400, 0));
        assert_eq!(summary.balance, Decimal::new(600, 0));
    }

    #[test]
    fn test_summary_excludes_other_periods() {
        let entries = vec![
            row(EntryKind::Income, "Fijo", "2024-03-05", 1000),
            row(EntryKind::Income, "Fijo", "2024-04-05", 700),
            row(EntryKind::Expense, "Tarjeta", "2023-03-20", 50),
            row(EntryKind::Expense, "Tarjeta", "2024-03-31", 25),
        ];

        let monthly = summarize(&entries, |d| march_2024().contains(d)).unwrap();
        assert_eq!(monthly.total_income, Decimal::new(1000, 0));
        assert_eq!(monthly.total_expense, Decimal::new(25, 0));

        let annual = summarize(&entries, |d| Period::Year(2024).contains(d)).unwrap();
        assert_eq!(annual.total_income, Decimal::new(1700, 0));
        assert_eq!(annual.total_expense, Decimal::new(25, 0));
        assert_eq!(annual.balance, Decimal::new(1675, 0));
    }

    #[test]
    fn test_unparseable_dates_are_dropped() {
        let entries = vec![
            row(EntryKind::Income, "Fijo", "2024-03-05", 1000),
            row(EntryKind::Income, "Fijo", "garbage", 999),
            row(EntryKind::Expense, "Tarjeta", "", 999),
        ];

        let summary = summarize(&entries, |_| true).unwrap();

        assert_eq!(summary.total_income, Decimal::new(1000, 0));
        assert_eq!(summary.total_expense, Decimal::ZERO);
    }

    #[test]
    fn test_filter_entries_keeps_positional_index() {
        let entries = vec![
            row(EntryKind::Income, "Fijo", "2024-01-05", 1),
            row(EntryKind::Income, "Fijo", "bad", 2),
            row(EntryKind::Expense, "Tarjeta", "2024-03-20", 3),
        ];

        let selected = filter_entries(&entries, |d| march_2024().contains(d));

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].0, 2);
    }

    #[test]
    fn test_empty_ledger_summary_is_zero() {
        assert_eq!(summarize(&[], |_| true).unwrap(), Summary::default());
    }

    #[test]
    fn test_monthly_totals_buckets() {
        let entries = vec![
            row(EntryKind::Income, "Fijo", "2024-01-10", 100),
            row(EntryKind::Expense, "Tarjeta", "2024-01-11", 40),
            row(EntryKind::Expense, "Tarjeta", "2024-12-31", 15),
            row(EntryKind::Income, "Fijo", "2023-12-31", 999),
        ];

        let months = monthly_totals(&entries, 2024).unwrap();

        assert_eq!(months[0].income, Decimal::new(100, 0));
        assert_eq!(months[0].expense, Decimal::new(40, 0));
        assert_eq!(months[11].expense, Decimal::new(15, 0));
        assert_eq!(months[11].income, Decimal::ZERO);
        assert!(months[1..11].iter().all(|m| *m == MonthTotals::default()));
    }

    #[test]
    fn test_expense_by_subtype() {
        let entries = vec![
            row(EntryKind::Expense, "Tarjeta", "2024-03-01", 10),
            row(EntryKind::Expense, "Gasto Vario", "2024-03-02", 5),
            row(EntryKind::Expense, "Tarjeta", "2024-03-03", 20),
            row(EntryKind::Income, "Fijo", "2024-03-04", 1000),
            row(EntryKind::Expense, "Tarjeta", "2025-03-03", 70),
        ];

        let totals = expense_by_subtype(&entries, Period::Year(2024)).unwrap();

        assert_eq!(
            totals,
            vec![
                ("Gasto Vario".to_string(), Decimal::new(5, 0)),
                ("Tarjeta".to_string(), Decimal::new(30, 0)),
            ]
        );
    }

    #[test]
    fn test_totals_out_of_decimal_range_are_errors() {
        let mut big = row(EntryKind::Income, "Fijo", "2024-03-05", 0);
        big.amount = Decimal::MAX;
        let mut big_expense = big.clone();
        big_expense.kind = EntryKind::Expense;
        big_expense.subtype = "Tarjeta".to_string();

        let incomes = vec![big.clone(), big];
        assert!(matches!(
            summarize(&incomes, |_| true),
            Err(AppError::InvalidInput(_))
        ));
        assert!(monthly_totals(&incomes, 2024).is_err());

        let expenses = vec![big_expense.clone(), big_expense];
        assert!(expense_by_subtype(&expenses, Period::Year(2024)).is_err());

        let summary = summarize(&expenses[..1], |_| true).unwrap();
        assert_eq!(summary.balance, -Decimal::MAX);
    }
}
