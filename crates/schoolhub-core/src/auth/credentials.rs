//! Remembered login passwords in the OS keychain.
//!
//! Only used when the user opts in with `login --remember`. A missing
//! keychain entry is a normal state, not an error.

use anyhow::{Context, Result};
use keyring::{Entry, Error as KeyringError};

/// Keychain service every SchoolHub entry is filed under
const KEYCHAIN_SERVICE: &str = "schoolhub";

/// The keychain slot for one account email
pub struct CredentialStore {
    email: String,
    entry: Entry,
}

impl CredentialStore {
    pub fn for_email(email: &str) -> Result<Self> {
        let entry = Entry::new(KEYCHAIN_SERVICE, email)
            .with_context(|| format!("Failed to open keychain entry for {}", email))?;
        Ok(Self {
            email: email.to_string(),
            entry,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn remember(&self, password: &str) -> Result<()> {
        self.entry
            .set_password(password)
            .context("Failed to store password in keychain")
    }

    /// The remembered password, or `None` when nothing is stored
    pub fn recall(&self) -> Result<Option<String>> {
        match self.entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(KeyringError::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to read password from keychain"),
        }
    }

    /// Drop the remembered password. Returns whether one existed.
    pub fn forget(&self) -> Result<bool> {
        match self.entry.delete_credential() {
            Ok(()) => Ok(true),
            Err(KeyringError::NoEntry) => Ok(false),
            Err(e) => Err(e).context("Failed to remove password from keychain"),
        }
    }
}
