use contracts::system::session::SessionUser;
use web_sys::window;

/// Persistence seam for the cached operator session
pub trait SessionStore {
    fn load(&self) -> Option<SessionUser>;
    fn save(&self, session: &SessionUser);
    fn clear(&self);
}

/// Session kept as JSON in `window.localStorage` under a fixed key
#[derive(Debug, Clone)]
pub struct LocalStorageSessionStore {
    key: String,
}

impl LocalStorageSessionStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub(crate) fn decode_session(raw: &str) -> Option<SessionUser> {
    match serde_json::from_str(raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("Ignoring malformed stored session: {}", e);
            None
        }
    }
}

impl SessionStore for LocalStorageSessionStore {
    fn load(&self) -> Option<SessionUser> {
        let raw = get_local_storage()?.get_item(&self.key).ok()??;
        decode_session(&raw)
    }

    fn save(&self, session: &SessionUser) {
        let Some(storage) = get_local_storage() else {
            log::warn!("localStorage unavailable, session not persisted");
            return;
        };
        match serde_json::to_string(session) {
            Ok(json) => {
                if storage.set_item(&self.key, &json).is_err() {
                    log::error!("Failed to write session under '{}'", self.key);
                }
            }
            Err(e) => log::error!("Failed to encode session: {}", e),
        }
    }

    fn clear(&self) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-memory stand-in for localStorage; clones share the same slot
    #[derive(Default, Clone)]
    pub(crate) struct MemorySessionStore {
        inner: Rc<RefCell<Option<SessionUser>>>,
    }

    impl SessionStore for MemorySessionStore {
        fn load(&self) -> Option<SessionUser> {
            self.inner.borrow().clone()
        }

        fn save(&self, session: &SessionUser) {
            *self.inner.borrow_mut() = Some(session.clone());
        }

        fn clear(&self) {
            *self.inner.borrow_mut() = None;
        }
    }

    #[test]
    fn test_memory_store_lifecycle() {
        let store = MemorySessionStore::default();
        assert_eq!(store.load(), None);

        let session = SessionUser {
            id: "1".into(),
            token: "t".into(),
            ..Default::default()
        };
        store.save(&session);
        assert_eq!(store.load(), Some(session));

        store.clear();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_decode_session() {
        let session = decode_session(r#"{"id":"5","login":"op","token":"abc"}"#).unwrap();
        assert_eq!(session.id, "5");
        assert_eq!(session.login, "op");
        assert_eq!(session.token, "abc");
        assert!(decode_session("not json").is_none());
    }

    #[test]
    fn test_store_key() {
        assert_eq!(LocalStorageSessionStore::new("user").key(), "user");
    }
}
