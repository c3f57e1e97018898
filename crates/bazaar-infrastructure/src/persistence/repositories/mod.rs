pub mod account_repo;
pub mod article_repo;
pub mod cached;
pub mod merchant_repo;

pub use account_repo::SqliteAccountRepository;
pub use article_repo::SqliteArticleRepository;
pub use cached::CachedRepository;
pub use merchant_repo::SqliteMerchantRepository;

use sqlx::SqlitePool;
use std::sync::Arc;

use bazaar_domain::account::Account;
use bazaar_domain::article::Article;
use bazaar_domain::merchant::Merchant;
use bazaar_domain::shared::{CacheStore, EntityRepository};

/// Builds the account repository, cache-decorated when a store is supplied.
pub fn account_repository(
    pool: Arc<SqlitePool>,
    cache: Option<Arc<dyn CacheStore>>,
) -> Arc<dyn EntityRepository<Account>> {
    let repo = SqliteAccountRepository::new(pool);
    match cache {
        Some(store) => Arc::new(CachedRepository::new(repo, store)),
        None => Arc::new(repo),
    }
}

pub fn article_repository(
    pool: Arc<SqlitePool>,
    cache: Option<Arc<dyn CacheStore>>,
) -> Arc<dyn EntityRepository<Article>> {
    let repo = SqliteArticleRepository::new(pool);
    match cache {
        Some(store) => Arc::new(CachedRepository::new(repo, store)),
        None => Arc::new(repo),
    }
}

pub fn merchant_repository(
    pool: Arc<SqlitePool>,
    cache: Option<Arc<dyn CacheStore>>,
) -> Arc<dyn EntityRepository<Merchant>> {
    let repo = SqliteMerchantRepository::new(pool);
    match cache {
        Some(store) => Arc::new(CachedRepository::new(repo, store)),
        None => Arc::new(repo),
    }
}
