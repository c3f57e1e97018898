use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;

use bazaar_domain::account::Account;
use bazaar_domain::shared::EntityRepository;
use bazaar_domain::{AccountId, RequestContext};
use bazaar_infrastructure::persistence::repositories::SqliteAccountRepository;
use bazaar_infrastructure::persistence::Database;

/// Builds a migrated database in a temp directory. Keep the `TempDir` alive
/// for the duration of the test.
pub async fn setup_database() -> (TempDir, Arc<SqlitePool>) {
    let _ = bazaar_infrastructure::logging::init(None);

    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("bazaar.db");
    let db = Database::new(path.to_str().expect("utf-8 path"))
        .await
        .expect("open database");
    db.run_migrations().await.expect("run migrations");

    (dir, Arc::new(db.pool().clone()))
}

/// Inserts an account to satisfy foreign keys on articles/merchants.
#[allow(dead_code)]
pub async fn seed_account(pool: &Arc<SqlitePool>, email: &str) -> AccountId {
    let repo = SqliteAccountRepository::new(Arc::clone(pool));
    let mut account = Account::new(email, "seed", "not-a-real-hash");
    repo.save(&RequestContext::new(), &mut account)
        .await
        .expect("seed account");
    account.id()
}
