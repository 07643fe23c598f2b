use std::path::PathBuf;

use super::{read_table, tables, write_table};
use crate::error::{AppError, Result};
use crate::models::LedgerEntry;

/// One user's ledger table (`data/<username>.csv`)
///
/// Rows have no identity beyond their position; an index is only meaningful
/// against the listing it was read from.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Full table in file order. A missing file is an empty ledger.
    pub fn list_all(&self) -> Result<Vec<LedgerEntry>> {
        read_table(&self.path)
    }

    /// Append a row and return its index
    pub fn append(&self, entry: LedgerEntry) -> Result<usize> {
        let mut entries = self.list_all()?;
        entries.push(entry);
        self.save(&entries)?;
        Ok(entries.len() - 1)
    }

    /// Replace every field of the row at `index`
    pub fn edit_at(&self, index: usize, entry: LedgerEntry) -> Result<()> {
        let mut entries = self.list_all()?;
        let slot = entries.get_mut(index).ok_or(AppError::EntryNotFound)?;
        *slot = entry;
        self.save(&entries)
    }

    /// Remove the row at `index`; later rows shift down by one
    pub fn delete_at(&self, index: usize) -> Result<LedgerEntry> {
        let mut entries = self.list_all()?;
        if index >= entries.len() {
            return Err(AppError::EntryNotFound);
        }
        let removed = entries.remove(index);
        self.save(&entries)?;
        Ok(removed)
    }

    fn save(&self, entries: &[LedgerEntry]) -> Result<()> {
        write_table(&self.path, tables::LEDGER_HEADERS, entries)
    }
}
