use super::{read_table, tables, write_table, Storage};
use crate::error::Result;
use crate::models::RememberedCredential;

/// Overwrite the remembered login with a single row
pub fn save(storage: &Storage, username: &str, password: &str) -> Result<()> {
    let row = RememberedCredential {
        username: username.to_string(),
        password: password.to_string(),
    };

    write_table(
        &storage.table_path(tables::REMEMBERED),
        tables::REMEMBERED.headers,
        &[row],
    )
}

/// Stored pair, or empty strings when nothing has been remembered
pub fn load(storage: &Storage) -> Result<RememberedCredential> {
    let rows: Vec<RememberedCredential> = read_table(&storage.table_path(tables::REMEMBERED))?;
    Ok(rows.into_iter().next().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_storage;
    use tempfile::TempDir;

    #[test]
    fn test_load_without_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = open_storage(temp_dir.path()).unwrap();

        assert_eq!(load(&storage).unwrap(), RememberedCredential::default());
    }

    #[test]
    fn test_save_overwrites_single_row() {
        let temp_dir = TempDir::new().unwrap();
        let storage = open_storage(temp_dir.path()).unwrap();

        save(&storage, "ana", "secreto").unwrap();
        save(&storage, "beto", "clave").unwrap();

        let remembered = load(&storage).unwrap();
        assert_eq!(remembered.username, "beto");
        assert_eq!(remembered.password, "clave");

        let contents =
            std::fs::read_to_string(storage.table_path(tables::REMEMBERED)).unwrap();
        assert_eq!(contents, "usuario,contraseña\nbeto,clave\n");
    }
}
