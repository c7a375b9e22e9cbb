use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::dto::PublicUser;
use crate::backend::BackendClient;
use crate::error::{ApiError, ErrorKind};

/// A live session as issued by the backend. The token fields are opaque
/// identifiers, not JWTs; the backend resolves them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token_id: String,
    pub refresh_token_id: String,
    pub user: PublicUser,
}

/// Where the current session lives between calls. Implementations decide
/// the medium; the rest of the crate only sees load/save/clear.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<AuthSession>;
    fn save(&self, session: &AuthSession);
    fn clear(&self);
}

/// In-memory store, also the test double.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<AuthSession>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<AuthSession> {
        self.slot.lock().expect("token store poisoned").clone()
    }

    fn save(&self, session: &AuthSession) {
        *self.slot.lock().expect("token store poisoned") = Some(session.clone());
    }

    fn clear(&self) {
        *self.slot.lock().expect("token store poisoned") = None;
    }
}

/// Drives the session lifecycle: created on login or register, replaced on
/// refresh, destroyed on logout or when the refresh path answers 401.
pub struct SessionManager {
    backend: BackendClient,
    store: Arc<dyn TokenStore>,
}

impl SessionManager {
    pub fn new(backend: BackendClient, store: Arc<dyn TokenStore>) -> Self {
        Self { backend, store }
    }

    pub fn current(&self) -> Option<AuthSession> {
        self.store.load()
    }

    pub fn active_user(&self) -> Option<Uuid> {
        self.store.load().map(|s| s.user.id)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let session = self.backend.login(email, password).await?;
        self.store.save(&session);
        debug!(user_id = %session.user.id, "session created");
        Ok(session)
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let session = self.backend.register(email, password).await?;
        self.store.save(&session);
        debug!(user_id = %session.user.id, "session created");
        Ok(session)
    }

    /// Exchange the stored refresh token for a fresh pair. A 401 here means
    /// the session is gone for good, so the store is cleared.
    pub async fn refresh(&self) -> Result<AuthSession, ApiError> {
        let current = self
            .store
            .load()
            .ok_or_else(|| ApiError::auth("no active session"))?;

        match self.backend.cookie_login(&current.refresh_token_id).await {
            Ok(session) => {
                self.store.save(&session);
                Ok(session)
            }
            Err(e) => {
                if e.kind == ErrorKind::Auth {
                    warn!("refresh rejected, destroying session");
                    self.store.clear();
                }
                Err(e)
            }
        }
    }

    /// End the session. The local store is cleared even when the backend
    /// call fails; a dead token is not worth keeping.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let Some(session) = self.store.load() else {
            return Ok(());
        };
        let result = self.backend.logout(&session.access_token_id).await;
        self.store.clear();
        match result {
            Err(e) if e.kind != ErrorKind::Auth => Err(e),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(user: Uuid) -> AuthSession {
        AuthSession {
            access_token_id: "access-1".into(),
            refresh_token_id: "refresh-1".into(),
            user: PublicUser {
                id: user,
                email: "user@example.com".into(),
            },
        }
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryTokenStore::new();
        assert!(store.load().is_none());

        let s = session(Uuid::new_v4());
        store.save(&s);
        let loaded = store.load().unwrap();
        assert_eq!(loaded.access_token_id, "access-1");
        assert_eq!(loaded.user.id, s.user.id);

        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn save_replaces_previous_session() {
        let store = MemoryTokenStore::new();
        store.save(&session(Uuid::new_v4()));

        let other = Uuid::new_v4();
        let mut next = session(other);
        next.access_token_id = "access-2".into();
        store.save(&next);

        let loaded = store.load().unwrap();
        assert_eq!(loaded.access_token_id, "access-2");
        assert_eq!(loaded.user.id, other);
    }
}
