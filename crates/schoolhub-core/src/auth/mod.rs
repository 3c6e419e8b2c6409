//! Authentication module for managing the user session and credentials.
//!
//! This module provides:
//! - `SessionStore`: the shared, persisted "who is logged in" state
//! - `SessionStorage`: the durable key/value backing (file or memory)
//! - `CredentialStore`: optional OS-level password storage via keyring
//!
//! The session has no client-side expiry: it lives until an explicit logout
//! or until the backend rejects the token with a 401.

pub mod credentials;
pub mod session;
pub mod storage;

pub use credentials::CredentialStore;
pub use session::{SessionSnapshot, SessionStore};
pub use storage::{clear_legacy_keys, FileStorage, MemoryStorage, SessionStorage};
