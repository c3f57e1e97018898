use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{AccountId, EntityRecord, MerchantId};

/// A merchant registered by a user. Names are unique across non-deleted
/// merchants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    id: MerchantId,
    name: String,
    user_id: AccountId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at_unix: i64,
}

impl Merchant {
    pub fn new(name: impl Into<String>, user_id: AccountId) -> Self {
        let now = Utc::now();
        Self {
            id: MerchantId::new(0),
            name: name.into().trim().to_string(),
            user_id,
            created_at: now,
            updated_at: now,
            deleted_at_unix: 0,
        }
    }

    pub fn restore(
        id: MerchantId,
        name: String,
        user_id: AccountId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at_unix: i64,
    ) -> Self {
        Self {
            id,
            name,
            user_id,
            created_at,
            updated_at,
            deleted_at_unix,
        }
    }

    pub fn id(&self) -> MerchantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user_id(&self) -> AccountId {
        self.user_id
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

impl EntityRecord for Merchant {
    type Id = MerchantId;

    const KIND: &'static str = "merchant";

    fn id(&self) -> MerchantId {
        self.id
    }

    fn assign_id(&mut self, raw: i64) {
        self.id = MerchantId::new(raw);
    }
}
