//! Accounts, session and profile pictures on top of the key-value store.

use std::collections::HashMap;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use color_eyre::eyre::Result;
use thiserror::Error;

use crate::storage::KeyValueStore;

const USERS_KEY: &str = "users";
const SESSION_KEY: &str = "user";

/// Validation failures, surfaced verbatim as the form's message line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please fill in all fields")]
    EmptyFields,
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Password must be 8+ characters, include a number and special character")]
    WeakPassword,
    #[error("Invalid username or password")]
    InvalidCredentials,
}

pub struct AccountManager {
    store: Box<dyn KeyValueStore>,
}

impl AccountManager {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Credential map: lowercase username -> password, one JSON blob.
    /// Cleartext by explicit non-goal; this is a local, single-user toy.
    fn users(&self) -> HashMap<String, String> {
        self.store
            .get(USERS_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    fn save_users(&mut self, users: &HashMap<String, String>) {
        match serde_json::to_string(users) {
            Ok(raw) => self.store.set(USERS_KEY, &raw),
            Err(err) => log::warn!("unable to serialize credential map: {}", err),
        }
    }

    pub fn register(&mut self, name: &str, password: &str) -> Result<String, AuthError> {
        let username = name.trim().to_lowercase();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::EmptyFields);
        }
        let mut users = self.users();
        if users.contains_key(&username) {
            return Err(AuthError::UsernameTaken);
        }
        if !is_secure_password(password) {
            return Err(AuthError::WeakPassword);
        }
        users.insert(username.clone(), password.to_string());
        self.save_users(&users);
        self.store.set(SESSION_KEY, &username);
        Ok(username)
    }

    pub fn login(&mut self, name: &str, password: &str) -> Result<String, AuthError> {
        let username = name.trim().to_lowercase();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::EmptyFields);
        }
        match self.users().get(&username) {
            Some(stored) if stored == password => {
                self.store.set(SESSION_KEY, &username);
                Ok(username)
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    pub fn current_user(&self) -> Option<String> {
        self.store.get(SESSION_KEY)
    }

    pub fn logout(&mut self) {
        self.store.remove(SESSION_KEY);
    }

    /// Removes the user's credentials, profile image and session. Other
    /// accounts are left alone.
    pub fn delete_account(&mut self, username: &str) {
        let mut users = self.users();
        users.remove(username);
        self.save_users(&users);
        self.store.remove(&profile_key(username));
        self.store.remove(SESSION_KEY);
    }

    /// Reads an image file and stores it as a data URL blob.
    pub fn set_profile_image(&mut self, username: &str, path: &Path) -> Result<()> {
        let bytes = std::fs::read(path)?;
        let mime = mime_for_path(path);
        let data_url = format!("data:{};base64,{}", mime, STANDARD.encode(&bytes));
        self.store.set(&profile_key(username), &data_url);
        Ok(())
    }

    pub fn profile_image(&self, username: &str) -> Option<String> {
        self.store.get(&profile_key(username))
    }
}

fn profile_key(username: &str) -> String {
    format!("profile-{}", username)
}

fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}

/// 8+ chars, at least one digit and one of `!@#$%^&*`, nothing outside
/// letters, digits and those specials.
pub fn is_secure_password(password: &str) -> bool {
    password.len() >= 8
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| "!@#$%^&*".contains(c))
        && password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!@#$%^&*".contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn manager() -> AccountManager {
        AccountManager::new(Box::new(MemoryStore::default()))
    }

    #[test]
    fn register_then_login() {
        let mut accounts = manager();
        assert_eq!(accounts.register("Tony", "m4rk42!suit"), Ok("tony".to_string()));
        assert_eq!(accounts.current_user(), Some("tony".to_string()));

        accounts.logout();
        assert_eq!(accounts.current_user(), None);

        // Username matching is case-insensitive via lowercasing.
        assert_eq!(accounts.login("TONY", "m4rk42!suit"), Ok("tony".to_string()));
    }

    #[test]
    fn register_rejects_duplicates_and_empty_fields() {
        let mut accounts = manager();
        accounts.register("tony", "m4rk42!suit").unwrap();

        assert_eq!(
            accounts.register("Tony ", "0therp@ss"),
            Err(AuthError::UsernameTaken)
        );
        assert_eq!(accounts.register("", "m4rk42!suit"), Err(AuthError::EmptyFields));
        assert_eq!(accounts.register("pepper", ""), Err(AuthError::EmptyFields));
    }

    #[test]
    fn weak_passwords_are_rejected() {
        let mut accounts = manager();
        assert_eq!(accounts.register("a", "short1!"), Err(AuthError::WeakPassword));
        assert_eq!(
            accounts.register("a", "nodigits!"),
            Err(AuthError::WeakPassword)
        );
        assert_eq!(
            accounts.register("a", "nospecial1"),
            Err(AuthError::WeakPassword)
        );
        assert_eq!(
            accounts.register("a", "bad space1!"),
            Err(AuthError::WeakPassword)
        );
        assert!(accounts.register("a", "g00dpass!").is_ok());
    }

    #[test]
    fn login_failures_are_one_message() {
        let mut accounts = manager();
        accounts.register("tony", "m4rk42!suit").unwrap();

        assert_eq!(
            accounts.login("tony", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            accounts.login("nobody", "m4rk42!suit"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid username or password"
        );
    }

    #[test]
    fn delete_account_removes_only_that_user() {
        let mut accounts = manager();
        accounts.register("tony", "m4rk42!suit").unwrap();
        accounts.register("pepper", "p0tts!pass").unwrap();

        accounts.delete_account("tony");

        assert_eq!(accounts.current_user(), None);
        assert_eq!(
            accounts.login("tony", "m4rk42!suit"),
            Err(AuthError::InvalidCredentials)
        );
        assert!(accounts.login("pepper", "p0tts!pass").is_ok());
    }

    #[test]
    fn profile_image_round_trips_as_data_url() {
        let mut accounts = manager();
        let path = std::env::temp_dir().join("jarvis-tui-test-avatar.png");
        std::fs::write(&path, b"not-really-a-png").unwrap();

        accounts.set_profile_image("tony", &path).unwrap();
        let url = accounts.profile_image("tony").unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        let payload = url.rsplit(',').next().unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), b"not-really-a-png");

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_profile_image_is_none() {
        let accounts = manager();
        assert_eq!(accounts.profile_image("tony"), None);
    }
}
