pub mod repository;

pub use repository::{InMemoryRepository, StoredResult, UserRecord, UserRepository};

use sha2::{Digest, Sha256};

use crate::error::{QuizError, Result};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Hex-encoded SHA-256 of a password
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Create a user record. The username is trimmed; the password is not.
///
/// Returns the stored username on success.
pub fn register<R: UserRepository>(repo: &mut R, username: &str, password: &str) -> Result<String> {
    let username = username.trim();
    if username.is_empty() {
        return Err(QuizError::InvalidUsername);
    }
    if repo.contains(username) {
        return Err(QuizError::UsernameTaken);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(QuizError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }

    repo.put(username, UserRecord::new(hash_password(password)));
    Ok(username.to_string())
}

/// Whether the password matches the stored hash for this user
pub fn check_credentials<R: UserRepository>(repo: &R, username: &str, password: &str) -> bool {
    repo.get(username.trim())
        .is_some_and(|record| record.password_hash == hash_password(password))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_is_sha256_hex() {
        assert_eq!(
            hash_password("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn test_register_then_login() {
        let mut repo = InMemoryRepository::new();
        let name = register(&mut repo, "  ada ", "secret1").unwrap();
        assert_eq!(name, "ada");

        assert!(check_credentials(&repo, "ada", "secret1"));
        assert!(!check_credentials(&repo, "ada", "secret2"));
        assert!(!check_credentials(&repo, "bob", "secret1"));
    }

    #[test]
    fn test_register_starts_with_no_results() {
        let mut repo = InMemoryRepository::new();
        register(&mut repo, "ada", "secret1").unwrap();
        assert!(repo.get("ada").unwrap().results.is_empty());
    }

    #[test]
    fn test_register_rejects_taken_username() {
        let mut repo = InMemoryRepository::new();
        register(&mut repo, "ada", "secret1").unwrap();
        assert_eq!(
            register(&mut repo, "ada", "another1"),
            Err(QuizError::UsernameTaken)
        );
        assert!(check_credentials(&repo, "ada", "secret1"));
    }

    #[test]
    fn test_register_rejects_short_password() {
        let mut repo = InMemoryRepository::new();
        assert_eq!(
            register(&mut repo, "ada", "12345"),
            Err(QuizError::PasswordTooShort { min: 6 })
        );
        assert!(repo.is_empty());
        assert!(register(&mut repo, "ada", "123456").is_ok());
    }

    #[test]
    fn test_register_rejects_blank_username() {
        let mut repo = InMemoryRepository::new();
        assert_eq!(
            register(&mut repo, "   ", "secret1"),
            Err(QuizError::InvalidUsername)
        );
    }
}
