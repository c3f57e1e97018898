use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{AccountId, EntityRecord};

/// A registered user. Input validation happens in the request-binding layer;
/// the constructor only normalizes. A non-zero `deleted_at_unix` marks the
/// account as soft-deleted and hides it from lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    email: String,
    username: String,
    password_hash: String,
    bio: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at_unix: i64,
}

impl Account {
    pub fn new(email: impl Into<String>, username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(0),
            email: email.into().trim().to_lowercase(),
            username: username.into().trim().to_string(),
            password_hash: password_hash.into(),
            bio: None,
            created_at: now,
            updated_at: now,
            deleted_at_unix: 0,
        }
    }

    /// Rehydrates an account from storage.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: AccountId,
        email: String,
        username: String,
        password_hash: String,
        bio: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at_unix: i64,
    ) -> Self {
        Self {
            id,
            email,
            username,
            password_hash,
            bio,
            created_at,
            updated_at,
            deleted_at_unix,
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deleted_at_unix(&self) -> i64 {
        self.deleted_at_unix
    }

    pub fn soft_delete(&mut self) {
        let now = Utc::now();
        self.deleted_at_unix = now.timestamp();
        self.updated_at = now;
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at_unix != 0
    }
}

impl EntityRecord for Account {
    type Id = AccountId;

    const KIND: &'static str = "account";

    fn id(&self) -> AccountId {
        self.id
    }

    fn assign_id(&mut self, raw: i64) {
        self.id = AccountId::new(raw);
    }
}
