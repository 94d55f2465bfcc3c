//! Light obfuscation of session values kept in browser storage.
//!
//! Values are XOR-ed with a static secret, base64-encoded and suffixed with a
//! short SHA-256 checksum. This deters casual editing of role/user/country in
//! devtools; it is not encryption and not an authorization boundary.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};
use std::cell::RefCell;
use std::collections::HashMap;

const CHECKSUM_LEN: usize = 8;

/// String key/value storage (browser localStorage, or a map in tests)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

fn xor(bytes: &[u8], secret: &[u8]) -> Vec<u8> {
    if secret.is_empty() {
        return bytes.to_vec();
    }
    bytes
        .iter()
        .zip(secret.iter().cycle())
        .map(|(b, k)| b ^ k)
        .collect()
}

fn checksum(secret: &[u8], value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret);
    hasher.update(value.as_bytes());
    hasher
        .finalize()
        .iter()
        .take(CHECKSUM_LEN / 2)
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Encodes `value` as `base64(xor(value)).checksum`
pub fn obfuscate(secret: &[u8], value: &str) -> String {
    let payload = STANDARD.encode(xor(value.as_bytes(), secret));
    format!("{}.{}", payload, checksum(secret, value))
}

/// Reverses [`obfuscate`]; `None` when the payload is malformed or tampered with
pub fn reveal(secret: &[u8], stored: &str) -> Option<String> {
    let (payload, sum) = stored.rsplit_once('.')?;
    if sum.len() != CHECKSUM_LEN {
        return None;
    }
    let bytes = STANDARD.decode(payload).ok()?;
    let value = String::from_utf8(xor(&bytes, secret)).ok()?;
    (checksum(secret, &value) == sum).then_some(value)
}

/// Storage wrapper that obfuscates values on write and verifies them on read.
pub struct ObfuscatedStore<S> {
    store: S,
    secret: Vec<u8>,
}

impl<S: KeyValueStore> ObfuscatedStore<S> {
    pub fn new(store: S, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            store,
            secret: secret.into(),
        }
    }

    pub fn set_item(&self, key: &str, value: &str) {
        self.store.set(key, &obfuscate(&self.secret, value));
    }

    /// Missing entries give `None`; corrupted ones are removed and also give `None`.
    pub fn get_item(&self, key: &str) -> Option<String> {
        let stored = self.store.get(key)?;
        match reveal(&self.secret, &stored) {
            Some(value) => Some(value),
            None => {
                log::warn!("integrity check failed for session key '{}', entry removed", key);
                self.store.remove(key);
                None
            }
        }
    }

    pub fn remove_item(&self, key: &str) {
        self.store.remove(key);
    }

    /// Raw underlying store, for values kept in plain form
    pub fn inner(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn round_trip_returns_original() {
        let store = ObfuscatedStore::new(MemoryStore::default(), SECRET);
        for value in ["admin", "", "Ünïcødé user", "AE"] {
            store.set_item("role", value);
            assert_eq!(store.get_item("role").as_deref(), Some(value));
        }
    }

    #[test]
    fn stored_form_does_not_contain_plain_value() {
        let store = ObfuscatedStore::new(MemoryStore::default(), SECRET);
        store.set_item("role", "supervisor");
        let raw = store.inner().get("role").unwrap();
        assert!(!raw.contains("supervisor"));
    }

    #[test]
    fn corrupted_payload_is_removed() {
        let store = ObfuscatedStore::new(MemoryStore::default(), SECRET);
        store.set_item("country", "KE");
        let raw = store.inner().get("country").unwrap();

        let (payload, sum) = raw.rsplit_once('.').unwrap();
        let mut bytes = STANDARD.decode(payload).unwrap();
        bytes[0] ^= 0x01;
        let tampered = format!("{}.{}", STANDARD.encode(bytes), sum);
        store.inner().set("country", &tampered);

        assert_eq!(store.get_item("country"), None);
        assert_eq!(store.inner().get("country"), None);
    }

    #[test]
    fn garbage_and_missing_entries_return_none() {
        let store = ObfuscatedStore::new(MemoryStore::default(), SECRET);
        assert_eq!(store.get_item("user"), None);

        store.inner().set("user", "not-a-valid-payload");
        assert_eq!(store.get_item("user"), None);
        assert_eq!(store.inner().get("user"), None);
    }

    #[test]
    fn different_secret_fails_the_check() {
        let stored = obfuscate(b"one", "manager");
        assert_eq!(reveal(b"one", &stored).as_deref(), Some("manager"));
        assert_eq!(reveal(b"two", &stored), None);
    }
}
