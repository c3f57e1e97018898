use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;
use tracing::{debug, error};

use bazaar_domain::account::Account;
use bazaar_domain::shared::{EntityRecord, EntityRepository, TxCallback, UnitOfWork};
use bazaar_domain::{AccountId, DomainError, RequestContext};

use crate::persistence::handle::DbSession;
use crate::persistence::SqliteUnitOfWork;

#[derive(FromRow)]
struct AccountRow {
    id: i64,
    email: String,
    username: String,
    password_hash: String,
    bio: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at_unix: i64,
}

impl AccountRow {
    fn into_account(self) -> Account {
        Account::restore(
            AccountId::new(self.id),
            self.email,
            self.username,
            self.password_hash,
            self.bio,
            self.created_at,
            self.updated_at,
            self.deleted_at_unix,
        )
    }
}

/// Account persistence over the base connection. Constructed with the pool
/// only; transactions are supplied per-call through the request context.
pub struct SqliteAccountRepository {
    pool: Arc<SqlitePool>,
    uow: SqliteUnitOfWork,
}

impl SqliteAccountRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            uow: SqliteUnitOfWork::new(Arc::clone(&pool)),
            pool,
        }
    }
}

#[async_trait]
impl UnitOfWork for SqliteAccountRepository {
    async fn run_in_tx(&self, ctx: &RequestContext, f: TxCallback) -> Result<(), DomainError> {
        self.uow.run_in_tx(ctx, f).await
    }
}

#[async_trait]
impl EntityRepository<Account> for SqliteAccountRepository {
    async fn save(&self, ctx: &RequestContext, record: &mut Account) -> Result<(), DomainError> {
        debug!(email = record.email(), "account.save");
        let session = DbSession::resolve(ctx, &self.pool);

        let query = sqlx::query(
            r#"
            INSERT INTO accounts (email, username, password_hash, bio, created_at, updated_at, deleted_at_unix)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(record.email())
        .bind(record.username())
        .bind(record.password_hash())
        .bind(record.bio())
        .bind(record.created_at())
        .bind(record.updated_at())
        .bind(record.deleted_at_unix());

        let result = session
            .execute(ctx, query, "save account")
            .await
            .map_err(|err| {
                error!(error = %err, "account.save failed");
                err
            })?;

        record.assign_id(result.last_insert_rowid());
        Ok(())
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: AccountId) -> Result<Account, DomainError> {
        debug!(%id, "account.find_by_id");
        let session = DbSession::resolve(ctx, &self.pool);

        let query = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, username, password_hash, bio, created_at, updated_at, deleted_at_unix
            FROM accounts
            WHERE id = ?1 AND deleted_at_unix = 0
            "#,
        )
        .bind(id.as_i64());

        let row = session
            .fetch_optional(ctx, query, "find account by id")
            .await
            .map_err(|err| {
                error!(error = %err, "account.find_by_id failed");
                err
            })?;

        match row {
            Some(row) => Ok(row.into_account()),
            None => {
                debug!(%id, "account.find_by_id: no live record");
                Err(DomainError::NotFound)
            }
        }
    }
}
