use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::storage::{
    clear_legacy_keys, MemoryStorage, SessionStorage, ROLE_KEY, SESSION_KEY, TOKEN_KEY, USER_KEY,
};
use crate::models::{Profile, Role};

/// Point-in-time view of the session.
///
/// Authentication is derived from the token, so a snapshot can never claim
/// to be authenticated without one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    token: Option<String>,
    user: Option<Profile>,
}

impl SessionSnapshot {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&Profile> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none()
    }
}

/// On-disk shape of the session record
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSession {
    token: Option<String>,
    user: Option<Profile>,
    #[serde(default)]
    is_authenticated: bool,
}

impl From<&SessionSnapshot> for PersistedSession {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            token: snapshot.token.clone(),
            user: snapshot.user.clone(),
            is_authenticated: snapshot.is_authenticated(),
        }
    }
}

impl From<PersistedSession> for SessionSnapshot {
    fn from(persisted: PersistedSession) -> Self {
        // The stored flag is ignored: the token decides
        match persisted.token {
            Some(token) => Self {
                token: Some(token),
                user: persisted.user,
            },
            None => Self::default(),
        }
    }
}

/// Shared, persisted authentication state.
///
/// Clone is cheap: clones share the same state and storage. Reads are
/// synchronous and always see the latest `set_auth`/`logout`.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<watch::Sender<SessionSnapshot>>,
    storage: Arc<dyn SessionStorage>,
    /// Held across persist + publish so storage and memory agree on the last writer
    write_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("SessionStore")
            .field("is_authenticated", &snapshot.is_authenticated())
            .field("role", &snapshot.role())
            .finish()
    }
}

impl SessionStore {
    /// Open the store over `storage`, restoring any persisted session
    pub fn open(storage: Arc<dyn SessionStorage>) -> Self {
        let initial = Self::rehydrate(storage.as_ref());
        debug!(authenticated = initial.is_authenticated(), "Session store opened");
        Self {
            state: Arc::new(watch::Sender::new(initial)),
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// A store that is not persisted anywhere
    pub fn in_memory() -> Self {
        Self::open(Arc::new(MemoryStorage::default()))
    }

    fn rehydrate(storage: &dyn SessionStorage) -> SessionSnapshot {
        let raw = match storage.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SessionSnapshot::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session");
                return SessionSnapshot::default();
            }
        };

        match serde_json::from_str::<PersistedSession>(&raw) {
            Ok(persisted) => persisted.into(),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable persisted session");
                SessionSnapshot::default()
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn user(&self) -> Option<Profile> {
        self.state.borrow().user.clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.state.borrow().role()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Receiver notified on every session change
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Record a successful login. Persists first, then publishes.
    pub fn set_auth(&self, token: impl Into<String>, user: Profile) {
        let snapshot = SessionSnapshot {
            token: Some(token.into()),
            user: Some(user),
        };
        let role = snapshot.role();
        {
            let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.persist(&snapshot);
            self.state.send_replace(snapshot);
        }
        info!(role = ?role, "Session established");
    }

    /// Clear the session in memory and in storage. Safe to call repeatedly.
    pub fn logout(&self) {
        let changed = {
            let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.erase();
            self.state.send_if_modified(|state| {
                if state.is_empty() {
                    false
                } else {
                    *state = SessionSnapshot::default();
                    true
                }
            })
        };
        if changed {
            info!("Session cleared");
        }
    }

    fn persist(&self, snapshot: &SessionSnapshot) {
        let record = match serde_json::to_string(&PersistedSession::from(snapshot)) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Failed to serialize session");
                return;
            }
        };
        self.store_key(SESSION_KEY, &record);

        if let Some(ref token) = snapshot.token {
            self.store_key(TOKEN_KEY, token);
        }
        if let Some(ref user) = snapshot.user {
            self.store_key(ROLE_KEY, user.role.as_str());
            match serde_json::to_string(user) {
                Ok(json) => self.store_key(USER_KEY, &json),
                Err(e) => warn!(error = %e, "Failed to serialize user profile"),
            }
        }
    }

    fn erase(&self) {
        if let Err(e) = self.storage.remove(SESSION_KEY) {
            warn!(error = %e, "Failed to remove persisted session");
        }
        clear_legacy_keys(self.storage.as_ref());
    }

    fn store_key(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            warn!(key, error = %e, "Failed to persist session key");
        }
    }
}
