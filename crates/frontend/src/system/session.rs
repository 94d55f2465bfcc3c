//! Сессия пользователя в localStorage.
//!
//! Токен хранится как есть под `auth_token`, а `user`/`role`/`country`
//! проходят через [`ObfuscatedStore`]. Сам вход выполняется внешним
//! приложением: здесь сессия только читается и очищается.

use contracts::shared::session_cipher::{KeyValueStore, ObfuscatedStore};
use leptos::prelude::*;
use web_sys::window;

const TOKEN_KEY: &str = "auth_token";
const USER_KEY: &str = "user";
const ROLE_KEY: &str = "role";
const COUNTRY_KEY: &str = "country";

const SESSION_SECRET: &[u8] = b"distribution-dashboard-session";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Браузерный localStorage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionInfo {
    pub token: Option<String>,
    pub user: Option<String>,
    pub role: Option<String>,
    pub country: Option<String>,
}

impl SessionInfo {
    pub fn is_signed_in(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

fn session_store<S: KeyValueStore>(store: S) -> ObfuscatedStore<S> {
    ObfuscatedStore::new(store, SESSION_SECRET)
}

/// Читает сессию из хранилища
pub fn load_from<S: KeyValueStore>(store: S) -> SessionInfo {
    let store = session_store(store);
    SessionInfo {
        token: store.inner().get(TOKEN_KEY).filter(|t| !t.is_empty()),
        user: store.get_item(USER_KEY),
        role: store.get_item(ROLE_KEY),
        country: store.get_item(COUNTRY_KEY),
    }
}

pub fn save_to<S: KeyValueStore>(store: S, info: &SessionInfo) {
    let store = session_store(store);
    match &info.token {
        Some(token) => store.inner().set(TOKEN_KEY, token),
        None => store.inner().remove(TOKEN_KEY),
    }
    for (key, value) in [
        (USER_KEY, &info.user),
        (ROLE_KEY, &info.role),
        (COUNTRY_KEY, &info.country),
    ] {
        match value {
            Some(value) => store.set_item(key, value),
            None => store.remove_item(key),
        }
    }
}

pub fn clear_in<S: KeyValueStore>(store: S) {
    let store = session_store(store);
    store.inner().remove(TOKEN_KEY);
    store.remove_item(USER_KEY);
    store.remove_item(ROLE_KEY);
    store.remove_item(COUNTRY_KEY);
}

pub fn load() -> SessionInfo {
    load_from(LocalStorage)
}

/// Токен для заголовка Authorization
pub fn access_token() -> Option<String> {
    LocalStorage.get(TOKEN_KEY).filter(|t| !t.is_empty())
}

/// Сессия в контексте приложения
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub info: RwSignal<SessionInfo>,
}

impl SessionContext {
    pub fn new() -> Self {
        let info = load();
        log::info!(
            "session restored: signed_in={}, role={:?}",
            info.is_signed_in(),
            info.role
        );
        Self {
            info: RwSignal::new(info),
        }
    }

    pub fn sign_out(&self) {
        clear_in(LocalStorage);
        self.info.set(SessionInfo::default());
        log::info!("session cleared");
    }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::session_cipher::MemoryStore;

    fn sample() -> SessionInfo {
        SessionInfo {
            token: Some("tok-123".into()),
            user: Some("Amina Yusuf".into()),
            role: Some("supervisor".into()),
            country: Some("KE".into()),
        }
    }

    #[test]
    fn saved_session_reads_back() {
        let store = MemoryStore::default();
        save_to(&store, &sample());
        assert_eq!(load_from(&store), sample());
        // токен хранится открыто, остальное нет
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok-123"));
        assert_ne!(store.get(ROLE_KEY).as_deref(), Some("supervisor"));
    }

    #[test]
    fn tampered_role_is_dropped() {
        let store = MemoryStore::default();
        save_to(&store, &sample());
        store.set(ROLE_KEY, "YWRtaW4=.00000000");
        let info = load_from(&store);
        assert_eq!(info.role, None);
        assert_eq!(info.user.as_deref(), Some("Amina Yusuf"));
        assert!(store.get(ROLE_KEY).is_none());
    }

    #[test]
    fn clear_removes_everything() {
        let store = MemoryStore::default();
        save_to(&store, &sample());
        clear_in(&store);
        let info = load_from(&store);
        assert!(!info.is_signed_in());
        assert_eq!(info, SessionInfo::default());
    }
}
