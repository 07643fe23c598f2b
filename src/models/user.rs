use serde::{Deserialize, Serialize};

/// Row of the credential table (`usuarios.csv`)
///
/// Passwords are stored and compared as plaintext to stay compatible with
/// existing credential files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "contraseña")]
    pub password: String,
}

/// Last successful login kept for pre-filling the login form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RememberedCredential {
    #[serde(rename = "usuario")]
    pub username: String,
    #[serde(rename = "contraseña")]
    pub password: String,
}

impl User {
    /// Usernames double as ledger file names, so path separators and
    /// hidden-file prefixes are refused.
    pub fn validate_username(username: &str) -> bool {
        !username.starts_with('.') && !username.contains(|c| c == '/' || c == '\\')
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(User::validate_username("ana"));
        assert!(User::validate_username("ana.perez"));
        assert!(User::validate_username("José"));

        assert!(!User::validate_username("../etc"));
        assert!(!User::validate_username("a/b"));
        assert!(!User::validate_username("a\\b"));
        assert!(!User::validate_username(".hidden"));
    }

    #[test]
    fn test_matches_is_exact() {
        let user = User {
            username: "ana".to_string(),
            password: "secreto".to_string(),
        };

        assert!(user.matches("ana", "secreto"));
        assert!(!user.matches("Ana", "secreto"));
        assert!(!user.matches("ana", "secreto "));
        assert!(!user.matches("ana", ""));
    }
}
