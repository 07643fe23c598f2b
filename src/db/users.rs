use super::{read_table, tables, write_table, Storage};
use crate::constants::ERR_INVALID_USERNAME;
use crate::error::{AppError, Result};
use crate::models::User;

/// Every registered user, in file order
pub fn load_users(storage: &Storage) -> Result<Vec<User>> {
    read_table(&storage.table_path(tables::USERS))
}

/// Append a new user to the credential table
///
/// Fails with `MissingFields` when either field is empty and with
/// `UserAlreadyExists` when the username is taken (exact match).
pub fn register(storage: &Storage, username: &str, password: &str) -> Result<()> {
    if username.is_empty() || password.is_empty() {
        return Err(AppError::MissingFields);
    }

    if !User::validate_username(username) {
        return Err(AppError::InvalidInput(ERR_INVALID_USERNAME.to_string()));
    }

    let mut users = load_users(storage)?;
    if users.iter().any(|u| u.username == username) {
        tracing::info!("User already exists: {}", username);
        return Err(AppError::UserAlreadyExists);
    }

    users.push(User {
        username: username.to_string(),
        password: password.to_string(),
    });
    write_table(
        &storage.table_path(tables::USERS),
        tables::USERS.headers,
        &users,
    )?;

    tracing::info!("New user registered: {}", username);
    Ok(())
}

/// Succeeds iff a row matches both username and password exactly
pub fn authenticate(storage: &Storage, username: &str, password: &str) -> Result<()> {
    let users = load_users(storage)?;

    if users.iter().any(|u| u.matches(username, password)) {
        Ok(())
    } else {
        tracing::warn!("Failed login attempt for user: {}", username);
        Err(AppError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_storage;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = open_storage(temp_dir.path()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_register_adds_exactly_one_row() {
        let (_temp_dir, storage) = setup();

        register(&storage, "ana", "secreto").unwrap();

        let users = load_users(&storage).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "ana");
        assert_eq!(users[0].password, "secreto");
    }

    #[test]
    fn test_register_twice_fails() {
        let (_temp_dir, storage) = setup();

        register(&storage, "ana", "secreto").unwrap();
        let second = register(&storage, "ana", "otra");

        assert!(matches!(second, Err(AppError::UserAlreadyExists)));
        assert_eq!(load_users(&storage).unwrap().len(), 1);
    }

    #[test]
    fn test_register_empty_fields() {
        let (_temp_dir, storage) = setup();

        assert!(matches!(
            register(&storage, "", "secreto"),
            Err(AppError::MissingFields)
        ));
        assert!(matches!(
            register(&storage, "ana", ""),
            Err(AppError::MissingFields)
        ));
        assert!(load_users(&storage).unwrap().is_empty());
    }

    #[test]
    fn test_register_rejects_path_like_usernames() {
        let (_temp_dir, storage) = setup();

        assert!(matches!(
            register(&storage, "../ana", "secreto"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_authenticate_exact_match() {
        let (_temp_dir, storage) = setup();
        register(&storage, "ana", "secreto").unwrap();
        register(&storage, "beto", "clave").unwrap();

        assert!(authenticate(&storage, "ana", "secreto").is_ok());
        assert!(authenticate(&storage, "beto", "clave").is_ok());

        // Passwords are not interchangeable between users
        assert!(matches!(
            authenticate(&storage, "ana", "clave"),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            authenticate(&storage, "nadie", "secreto"),
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_credentials_with_commas_survive() {
        let (_temp_dir, storage) = setup();
        register(&storage, "ana,perez", "a,b\"c").unwrap();

        assert!(authenticate(&storage, "ana,perez", "a,b\"c").is_ok());
    }
}
