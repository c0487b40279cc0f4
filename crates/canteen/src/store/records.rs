use super::{KeyValueStore, StoreError};
use crate::auth::{Role, Session};
use crate::model::cart::serve_option_field;
use crate::model::{Amount, CartItem, Order, ServeOption, TopUp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

pub const USER_DATA_PREFIX: &str = "userData_";
pub const SESSION_EMAIL_KEY: &str = "loggedInUserEmail";
pub const SESSION_NAME_KEY: &str = "loggedInUserName";
pub const SESSION_ROLE_KEY: &str = "loggedInUserRole";

/// A diner's persisted state.
///
/// Fields this crate does not know about are kept in `extra` and written back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default)]
    pub cart: Vec<CartItem>,
    #[serde(default)]
    pub last_ordered: Vec<Order>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_allowance: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_allowance: Option<Amount>,
    #[serde(default)]
    pub quantities: BTreeMap<String, u32>,
    #[serde(default, with = "serve_option_field")]
    pub serve_option: Option<ServeOption>,
    #[serde(default)]
    pub top_up_history: Vec<TopUp>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

pub fn user_key(email: &str) -> String {
    format!("{USER_DATA_PREFIX}{email}")
}

/// Typed access to user records and the saved session.
///
/// Writes are read-modify-write under one lock, so two writers cannot drop each other's fields.
#[derive(Clone)]
pub struct UserRecords {
    store: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl UserRecords {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Loads a user's record. Missing or unreadable records come back as defaults.
    pub fn load(&self, email: &str) -> UserRecord {
        match self.try_load(email) {
            Ok(Some(record)) => record,
            Ok(None) => UserRecord::default(),
            Err(e) => {
                warn!(email, error = %e, "Unreadable user record, starting fresh");
                UserRecord::default()
            }
        }
    }

    fn try_load(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        match self.store.get(&user_key(email))? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Applies `change` to the stored record and writes it back.
    pub fn update(
        &self,
        email: &str,
        change: impl FnOnce(&mut UserRecord),
    ) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut record = self.load(email);
        change(&mut record);
        let raw = serde_json::to_string(&record)?;
        self.store.set(&user_key(email), &raw)?;
        debug!(email, "User record saved");
        Ok(())
    }

    pub fn remove(&self, email: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;
        self.store.remove(&user_key(email))
    }

    /// Emails of every user with a stored record.
    pub fn emails(&self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .store
            .keys()?
            .into_iter()
            .filter_map(|key| key.strip_prefix(USER_DATA_PREFIX).map(str::to_string))
            .collect())
    }

    pub fn save_session(&self, session: &Session) -> Result<(), StoreError> {
        self.store.set(SESSION_EMAIL_KEY, &session.email)?;
        self.store.set(SESSION_NAME_KEY, &session.name)?;
        self.store.set(SESSION_ROLE_KEY, session.role.as_str())
    }

    /// The saved session, if an email is stored. An unknown role reads as a plain user.
    pub fn load_session(&self) -> Result<Option<Session>, StoreError> {
        let Some(email) = self.store.get(SESSION_EMAIL_KEY)? else {
            return Ok(None);
        };
        let name = self.store.get(SESSION_NAME_KEY)?.unwrap_or_default();
        let role = self
            .store
            .get(SESSION_ROLE_KEY)?
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(Role::User);
        Ok(Some(Session { email, name, role }))
    }

    pub fn clear_session(&self) -> Result<(), StoreError> {
        self.store.remove(SESSION_EMAIL_KEY)?;
        self.store.remove(SESSION_NAME_KEY)?;
        self.store.remove(SESSION_ROLE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn records() -> (Arc<MemoryStore>, UserRecords) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), UserRecords::new(store))
    }

    #[test]
    fn corrupt_record_falls_back_to_defaults() {
        let (store, records) = records();
        store.set("userData_a@b.c", "{not json").unwrap();
        assert_eq!(records.load("a@b.c"), UserRecord::default());
    }

    #[test]
    fn update_keeps_unknown_fields() {
        let (store, records) = records();
        store
            .set(
                "userData_a@b.c",
                r#"{"favouriteDish":"Beef","remainingAllowance":900}"#,
            )
            .unwrap();

        records
            .update("a@b.c", |record| record.remaining_allowance = Some(400))
            .unwrap();

        let raw = store.get("userData_a@b.c").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["favouriteDish"], "Beef");
        assert_eq!(value["remainingAllowance"], 400);
        assert_eq!(value["serveOption"], "");
    }

    #[test]
    fn emails_lists_only_user_records() {
        let (store, records) = records();
        store.set(SESSION_EMAIL_KEY, "a@b.c").unwrap();
        records.update("a@b.c", |_| {}).unwrap();
        records.update("d@e.f", |_| {}).unwrap();
        assert_eq!(records.emails().unwrap(), vec!["a@b.c", "d@e.f"]);
    }

    #[test]
    fn session_round_trip() {
        let (store, records) = records();
        assert!(records.load_session().unwrap().is_none());

        let session = Session {
            email: "walker123@gmail.com".into(),
            name: "Walker".into(),
            role: Role::Admin,
        };
        records.save_session(&session).unwrap();
        assert_eq!(store.get(SESSION_ROLE_KEY).unwrap().as_deref(), Some("admin"));
        assert_eq!(records.load_session().unwrap(), Some(session));

        store.set(SESSION_ROLE_KEY, "chef").unwrap();
        assert_eq!(records.load_session().unwrap().unwrap().role, Role::User);

        records.clear_session().unwrap();
        assert!(records.load_session().unwrap().is_none());
    }
}
