//! Account backend collaborator: account creation, profile storage,
//! verification email, session.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Minimum password length accepted by [`MemoryBackend`].
pub const MIN_PASSWORD_LEN: usize = 6;

/// Reference to an account created by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountHandle {
    pub id: String,
    pub email: String,
}

/// Profile document stored per account, keyed by account id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    pub name: String,
    pub surname: String,
    pub birthdate: NaiveDate,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Failures reported by the account backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("email already in use: {0}")]
    EmailAlreadyInUse(String),

    #[error("invalid email: {0}")]
    InvalidEmail(String),

    #[error("password shorter than {MIN_PASSWORD_LEN} characters")]
    WeakPassword,

    #[error("no account with id {0}")]
    AccountNotFound(String),

    #[error("profile storage failed: {0}")]
    Storage(String),

    #[error("verification email failed: {0}")]
    Delivery(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl BackendError {
    /// Message suitable for an alert shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmailAlreadyInUse(_) => "This email address is already in use.".to_string(),
            Self::InvalidEmail(_) => "The email address is not valid.".to_string(),
            Self::WeakPassword => format!(
                "The password is too weak. Use at least {MIN_PASSWORD_LEN} characters."
            ),
            Self::AccountNotFound(_) => "The account could not be found.".to_string(),
            Self::Storage(_) => "Your profile could not be saved. Please try again.".to_string(),
            Self::Delivery(_) => {
                "The verification email could not be sent. Please try again.".to_string()
            }
            Self::Unavailable(_) => {
                "The service is unavailable. Check your connection and try again.".to_string()
            }
        }
    }
}

/// Remote account operations used by registration.
pub trait AccountBackend {
    /// Create an account and sign it in.
    fn create_account(&mut self, email: &str, password: &str)
    -> Result<AccountHandle, BackendError>;

    /// Create or overwrite the profile document of `account_id`.
    fn persist_profile(
        &mut self,
        account_id: &str,
        profile: &ProfileDocument,
    ) -> Result<(), BackendError>;

    fn send_verification_email(&mut self, account: &AccountHandle) -> Result<(), BackendError>;

    fn sign_out(&mut self) -> Result<(), BackendError>;
}

/// In-process backend holding accounts for the lifetime of the program.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    accounts: HashMap<String, AccountHandle>,
    profiles: HashMap<String, ProfileDocument>,
    outbox: Vec<String>,
    session: Option<String>,
    next_id: u64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account registered for `email`, case-insensitive.
    pub fn account(&self, email: &str) -> Option<&AccountHandle> {
        self.accounts.get(&email.to_lowercase())
    }

    pub fn profile(&self, account_id: &str) -> Option<&ProfileDocument> {
        self.profiles.get(account_id)
    }

    /// Addresses verification emails were sent to, oldest first.
    pub fn verification_outbox(&self) -> &[String] {
        &self.outbox
    }

    /// Id of the signed-in account.
    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    fn knows(&self, account_id: &str) -> bool {
        self.accounts.values().any(|a| a.id == account_id)
    }
}

fn is_plausible_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        })
}

impl AccountBackend for MemoryBackend {
    fn create_account(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<AccountHandle, BackendError> {
        if !is_plausible_email(email) {
            return Err(BackendError::InvalidEmail(email.to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(BackendError::WeakPassword);
        }
        let key = email.to_lowercase();
        if self.accounts.contains_key(&key) {
            return Err(BackendError::EmailAlreadyInUse(email.to_string()));
        }

        self.next_id += 1;
        let handle = AccountHandle {
            id: format!("uid-{:06}", self.next_id),
            email: email.to_string(),
        };
        self.accounts.insert(key, handle.clone());
        self.session = Some(handle.id.clone());
        tracing::debug!(account_id = %handle.id, "Account created");
        Ok(handle)
    }

    fn persist_profile(
        &mut self,
        account_id: &str,
        profile: &ProfileDocument,
    ) -> Result<(), BackendError> {
        if !self.knows(account_id) {
            return Err(BackendError::AccountNotFound(account_id.to_string()));
        }
        self.profiles
            .insert(account_id.to_string(), profile.clone());
        Ok(())
    }

    fn send_verification_email(&mut self, account: &AccountHandle) -> Result<(), BackendError> {
        if !self.knows(&account.id) {
            return Err(BackendError::AccountNotFound(account.id.clone()));
        }
        self.outbox.push(account.email.clone());
        Ok(())
    }

    fn sign_out(&mut self) -> Result<(), BackendError> {
        self.session = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_plausibility() {
        assert!(is_plausible_email("ada@example.com"));
        assert!(!is_plausible_email("ada.example.com"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("ada@example"));
        assert!(!is_plausible_email("ada @example.com"));
    }

    #[test]
    fn duplicate_email_is_case_insensitive() {
        let mut backend = MemoryBackend::new();
        backend.create_account("Ada@Example.com", "secret1").unwrap();
        let err = backend
            .create_account("ada@example.com", "secret1")
            .unwrap_err();
        assert!(matches!(err, BackendError::EmailAlreadyInUse(_)));
    }

    #[test]
    fn create_signs_in_and_sign_out_clears() {
        let mut backend = MemoryBackend::new();
        let handle = backend.create_account("ada@example.com", "secret1").unwrap();
        assert_eq!(backend.session(), Some(handle.id.as_str()));
        backend.sign_out().unwrap();
        assert_eq!(backend.session(), None);
    }

    #[test]
    fn profile_for_unknown_account_fails() {
        let mut backend = MemoryBackend::new();
        let profile = ProfileDocument {
            name: "Ada".into(),
            surname: "Lovelace".into(),
            birthdate: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            email: "ada@example.com".into(),
            created_at: Utc::now(),
        };
        let err = backend.persist_profile("uid-404", &profile).unwrap_err();
        assert_eq!(err, BackendError::AccountNotFound("uid-404".into()));
    }

    #[test]
    fn profile_serializes_with_iso_dates() {
        let profile = ProfileDocument {
            name: "Ada".into(),
            surname: "Lovelace".into(),
            birthdate: NaiveDate::from_ymd_opt(1990, 4, 2).unwrap(),
            email: "ada@example.com".into(),
            created_at: DateTime::parse_from_rfc3339("2026-10-18T09:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["birthdate"], "1990-04-02");
        assert_eq!(json["createdAt"], "2026-10-18T09:30:00Z");
    }
}
