pub mod ledger;
pub mod remembered;
pub mod tables;
pub mod users;

use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub use ledger::Ledger;

/// Handle to the data root holding every CSV table
///
/// Cheap to clone. Each operation reads the whole table and rewrites it whole;
/// nothing is locked, so concurrent writers to the same file are last-write-wins.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn table_path(&self, table: tables::TableFile) -> PathBuf {
        self.root.join(table.name)
    }

    pub fn ledger_path(&self, username: &str) -> PathBuf {
        self.root
            .join(tables::LEDGER_DIR)
            .join(format!("{}.csv", username))
    }

    /// Ledger of one user
    pub fn ledger(&self, username: &str) -> Ledger {
        Ledger::new(self.ledger_path(username))
    }
}

/// Open or create the data root at the given path
///
/// Creates the ledger directory and an empty credential table on first run.
pub fn open_storage(path: impl AsRef<Path>) -> Result<Storage> {
    let root = path.as_ref().to_path_buf();
    tracing::info!("Opening storage at: {:?}", root);

    let ledger_dir = root.join(tables::LEDGER_DIR);
    if !ledger_dir.exists() {
        fs::create_dir_all(&ledger_dir).map_err(|e| {
            tracing::error!("Failed to create ledger directory: {}", e);
            e
        })?;
    }

    let storage = Storage { root };

    let users_path = storage.table_path(tables::USERS);
    if !users_path.exists() {
        write_table::<crate::models::User>(&users_path, tables::USERS.headers, &[])?;
    }

    tracing::info!("Storage initialized successfully");

    Ok(storage)
}

/// Read every row of a table. A missing file reads as an empty table.
pub fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()?;

    Ok(rows)
}

/// Overwrite a table with `rows`. The header row is written even when empty.
pub fn write_table<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use tempfile::TempDir;

    #[test]
    fn test_open_storage_creates_layout() {
        let temp_dir = TempDir::new().unwrap();
        let storage = open_storage(temp_dir.path()).unwrap();

        assert!(temp_dir.path().join("data").is_dir());

        let users = fs::read_to_string(storage.table_path(tables::USERS)).unwrap();
        assert_eq!(users, "usuario,contraseña\n");
    }

    #[test]
    fn test_open_storage_keeps_existing_users() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("usuarios.csv"),
            "usuario,contraseña\nana,secreto\n",
        )
        .unwrap();

        let storage = open_storage(temp_dir.path()).unwrap();
        let users: Vec<User> = read_table(&storage.table_path(tables::USERS)).unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "ana");
    }

    #[test]
    fn test_read_missing_table_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let rows: Vec<User> = read_table(&temp_dir.path().join("nope.csv")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_ledger_path_layout() {
        let temp_dir = TempDir::new().unwrap();
        let storage = open_storage(temp_dir.path()).unwrap();

        assert_eq!(
            storage.ledger_path("ana"),
            temp_dir.path().join("data").join("ana.csv")
        );
    }
}
