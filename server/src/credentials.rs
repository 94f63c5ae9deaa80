//! Driver credential records, persisted in sled.
//!
//! Login and signup live in a separate subsystem; the hub only guarantees
//! the table exists at startup. `put`/`get` are the interface that subsystem
//! programs against, unused by the hub itself. Records are postcard-encoded
//! and keyed by their unique email.

use serde::{Deserialize, Serialize};
use sled::Db;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Credential {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

pub struct CredentialStore {
    tree: sled::Tree,
}

impl CredentialStore {
    /// Open the credentials tree, creating it if absent. Safe to call on
    /// every startup.
    pub fn open(db: &Db) -> anyhow::Result<Self> {
        let tree = db.open_tree("credentials")?;
        Ok(Self { tree })
    }

    /// Insert or overwrite the record keyed by its email.
    pub fn put(&self, credential: &Credential) -> anyhow::Result<()> {
        let value = postcard::to_allocvec(credential)?;
        self.tree.insert(credential.email.as_bytes(), value)?;
        Ok(())
    }

    pub fn get(&self, email: &str) -> anyhow::Result<Option<Credential>> {
        let Some(value) = self.tree.get(email.as_bytes())? else {
            return Ok(None);
        };
        Ok(Some(postcard::from_bytes(&value)?))
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_db() -> Db {
        sled::Config::new().temporary(true).open().unwrap()
    }

    fn ana() -> Credential {
        Credential {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password_hash: "argon2id$...".into(),
        }
    }

    #[test]
    fn put_then_get_roundtrip() {
        let db = temp_db();
        let store = CredentialStore::open(&db).unwrap();

        store.put(&ana()).unwrap();
        assert_eq!(store.get("ana@example.com").unwrap().unwrap(), ana());
    }

    #[test]
    fn unknown_email_is_none() {
        let db = temp_db();
        let store = CredentialStore::open(&db).unwrap();
        assert!(store.is_empty());
        assert!(store.get("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn open_is_idempotent() {
        let db = temp_db();
        let store = CredentialStore::open(&db).unwrap();
        store.put(&ana()).unwrap();

        let reopened = CredentialStore::open(&db).unwrap();
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn email_is_a_unique_key() {
        let db = temp_db();
        let store = CredentialStore::open(&db).unwrap();

        store.put(&ana()).unwrap();
        store
            .put(&Credential {
                name: "Ana Maria".into(),
                ..ana()
            })
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("ana@example.com").unwrap().unwrap().name, "Ana Maria");
    }
}
