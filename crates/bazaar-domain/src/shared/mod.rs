use serde::{Deserialize, Serialize};

pub mod cache;
pub mod context;
pub mod error;
pub mod repository;
pub mod transaction;

pub use cache::CacheStore;
pub use context::RequestContext;
pub use error::DomainError;
pub use repository::{EntityRecord, EntityRepository};
pub use transaction::{tx_fn, TxCallback, UnitOfWork};

macro_rules! define_id {
    ($name:ident) => {
        /// Typed wrapper around a storage rowid. `0` means "not yet persisted".
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

define_id!(AccountId);
define_id!(ArticleId);
define_id!(MerchantId);
