use contracts::system::session::SessionUser;
use leptos::prelude::*;

use super::storage::{LocalStorageSessionStore, SessionStore};
use crate::shared::config::ClientConfig;

/// Reactive handle to the operator session and its backing store
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub session: RwSignal<SessionUser>,
    store: StoredValue<Box<dyn SessionStore>, LocalStorage>,
}

impl SessionContext {
    /// Reads the store once; later reads go through the signal.
    pub fn init(store: impl SessionStore + 'static) -> Self {
        let initial = store.load().unwrap_or_default();
        log::debug!("session restored: authenticated={}", initial.is_authenticated());
        Self {
            session: RwSignal::new(initial),
            store: StoredValue::new_local(Box::new(store)),
        }
    }

    pub fn current(&self) -> SessionUser {
        self.session.get_untracked()
    }

    pub fn token(&self) -> String {
        self.session.with_untracked(|s| s.token.clone())
    }

    /// Replace the cached identity and persist it.
    pub fn replace(&self, next: SessionUser) {
        self.store.with_value(|store| store.save(&next));
        self.session.set(next);
    }

    /// Logout teardown.
    pub fn clear(&self) {
        self.store.with_value(|store| store.clear());
        self.session.set(SessionUser::default());
    }
}

/// Session context provider component
#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let config = use_context::<ClientConfig>().unwrap_or_else(ClientConfig::from_env);
    let store = LocalStorageSessionStore::new(config.session_key);
    log::debug!("session store key '{}'", store.key());
    provide_context(SessionContext::init(store));

    children()
}

/// Hook to access the session
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionProvider not found in component tree")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::session::storage::tests::MemorySessionStore;

    fn operator() -> SessionUser {
        SessionUser {
            id: "1".into(),
            login: "root".into(),
            token: "tok".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_init_restores_stored_session() {
        let owner = Owner::new();
        owner.set();

        let store = MemorySessionStore::default();
        store.save(&operator());
        let ctx = SessionContext::init(store);

        assert_eq!(ctx.current(), operator());
        assert_eq!(ctx.token(), "tok");
    }

    #[test]
    fn test_init_without_stored_session() {
        let owner = Owner::new();
        owner.set();

        let ctx = SessionContext::init(MemorySessionStore::default());
        assert!(!ctx.current().is_authenticated());
        assert_eq!(ctx.token(), "");
    }

    #[test]
    fn test_replace_persists_and_clear_removes() {
        let owner = Owner::new();
        owner.set();

        let store = MemorySessionStore::default();
        let ctx = SessionContext::init(store.clone());

        let next = SessionUser {
            email: "root@example.com".into(),
            ..operator()
        };
        ctx.replace(next.clone());
        assert_eq!(ctx.current(), next);
        assert_eq!(store.load(), Some(next));

        ctx.clear();
        assert_eq!(ctx.current(), SessionUser::default());
        assert_eq!(store.load(), None);
    }
}
