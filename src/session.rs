use std::path::PathBuf;
use std::sync::RwLock;
use tracing::{debug, info, warn};

use crate::utils::encryption::{open_token, seal_token};

/// Where and how the token is persisted between runs
struct PersistConfig {
    path: PathBuf,
    key_hex: String,
}

/// Holds the bearer token for the current login session.
///
/// The token lives in memory; when `PPOB_SESSION_FILE` and
/// `PPOB_SESSION_KEY` are configured it is also written to disk sealed
/// with AES-256-GCM, so a restart does not force a fresh login.
pub struct SessionStore {
    token: RwLock<Option<String>>,
    persist: Option<PersistConfig>,
}

impl SessionStore {
    /// In-memory only store, mostly for tests
    pub fn in_memory() -> Self {
        SessionStore {
            token: RwLock::new(None),
            persist: None,
        }
    }

    /// Build the store from `PPOB_SESSION_FILE` / `PPOB_SESSION_KEY` and
    /// reload a previously persisted token if one is readable.
    pub fn from_env() -> Self {
        let persist = match (std::env::var("PPOB_SESSION_FILE"), std::env::var("PPOB_SESSION_KEY")) {
            (Ok(path), Ok(key_hex)) => Some(PersistConfig {
                path: PathBuf::from(path),
                key_hex,
            }),
            _ => {
                debug!("Session persistence disabled (PPOB_SESSION_FILE/PPOB_SESSION_KEY not set)");
                None
            }
        };

        let store = SessionStore {
            token: RwLock::new(None),
            persist,
        };
        store.reload_persisted();
        store
    }

    fn reload_persisted(&self) {
        let Some(persist) = &self.persist else {
            return;
        };
        match std::fs::read_to_string(&persist.path) {
            Ok(sealed) => match open_token(&sealed, &persist.key_hex) {
                Ok(token) => {
                    info!("Restored session token from {}", persist.path.display());
                    *self.token.write().expect("session lock poisoned") = Some(token);
                }
                Err(e) => warn!("Ignoring unreadable session file: {}", e),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to read session file: {}", e),
        }
    }

    /// Current bearer token, if logged in
    pub fn token(&self) -> Option<String> {
        self.token.read().expect("session lock poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().expect("session lock poisoned").is_some()
    }

    /// Store a fresh token and persist it when configured
    pub fn set_token(&self, token: String) {
        if let Some(persist) = &self.persist {
            match seal_token(&token, &persist.key_hex) {
                Ok(sealed) => {
                    if let Err(e) = std::fs::write(&persist.path, sealed) {
                        warn!("Failed to persist session token: {}", e);
                    }
                }
                Err(e) => warn!("Failed to seal session token: {}", e),
            }
        }
        *self.token.write().expect("session lock poisoned") = Some(token);
    }

    /// Forget the token in memory and on disk
    pub fn clear(&self) {
        *self.token.write().expect("session lock poisoned") = None;
        if let Some(persist) = &self.persist {
            if let Err(e) = std::fs::remove_file(&persist.path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to remove session file: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_roundtrip() {
        let store = SessionStore::in_memory();
        assert!(!store.is_authenticated());
        assert_eq!(store.token(), None);

        store.set_token("jwt-123".to_string());
        assert!(store.is_authenticated());
        assert_eq!(store.token(), Some("jwt-123".to_string()));

        store.clear();
        assert!(!store.is_authenticated());
    }
}
