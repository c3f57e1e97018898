use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;
use tracing::{debug, error};

use bazaar_domain::merchant::Merchant;
use bazaar_domain::shared::{EntityRecord, EntityRepository, TxCallback, UnitOfWork};
use bazaar_domain::{AccountId, DomainError, MerchantId, RequestContext};

use crate::persistence::handle::DbSession;
use crate::persistence::SqliteUnitOfWork;

#[derive(FromRow)]
struct MerchantRow {
    id: i64,
    name: String,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at_unix: i64,
}

impl MerchantRow {
    fn into_merchant(self) -> Merchant {
        Merchant::restore(
            MerchantId::new(self.id),
            self.name,
            AccountId::new(self.user_id),
            self.created_at,
            self.updated_at,
            self.deleted_at_unix,
        )
    }
}

pub struct SqliteMerchantRepository {
    pool: Arc<SqlitePool>,
    uow: SqliteUnitOfWork,
}

impl SqliteMerchantRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            uow: SqliteUnitOfWork::new(Arc::clone(&pool)),
            pool,
        }
    }
}

#[async_trait]
impl UnitOfWork for SqliteMerchantRepository {
    async fn run_in_tx(&self, ctx: &RequestContext, f: TxCallback) -> Result<(), DomainError> {
        self.uow.run_in_tx(ctx, f).await
    }
}

#[async_trait]
impl EntityRepository<Merchant> for SqliteMerchantRepository {
    async fn save(&self, ctx: &RequestContext, record: &mut Merchant) -> Result<(), DomainError> {
        debug!(name = record.name(), "merchant.save");
        let session = DbSession::resolve(ctx, &self.pool);

        let query = sqlx::query(
            r#"
            INSERT INTO merchants (name, user_id, created_at, updated_at, deleted_at_unix)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(record.name())
        .bind(record.user_id().as_i64())
        .bind(record.created_at())
        .bind(record.updated_at())
        .bind(record.deleted_at_unix());

        let result = session
            .execute(ctx, query, "save merchant")
            .await
            .map_err(|err| {
                error!(error = %err, "merchant.save failed");
                err
            })?;

        record.assign_id(result.last_insert_rowid());
        Ok(())
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: MerchantId) -> Result<Merchant, DomainError> {
        debug!(%id, "merchant.find_by_id");
        let session = DbSession::resolve(ctx, &self.pool);

        let query = sqlx::query_as::<_, MerchantRow>(
            r#"
            SELECT id, name, user_id, created_at, updated_at, deleted_at_unix
            FROM merchants
            WHERE id = ?1 AND deleted_at_unix = 0
            "#,
        )
        .bind(id.as_i64());

        let row = session
            .fetch_optional(ctx, query, "find merchant by id")
            .await
            .map_err(|err| {
                error!(error = %err, "merchant.find_by_id failed");
                err
            })?;

        row.map(MerchantRow::into_merchant).ok_or(DomainError::NotFound)
    }
}
