use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;
use tracing::{debug, error};

use bazaar_domain::article::Article;
use bazaar_domain::shared::{EntityRecord, EntityRepository, TxCallback, UnitOfWork};
use bazaar_domain::{AccountId, ArticleId, DomainError, RequestContext};

use crate::persistence::handle::DbSession;
use crate::persistence::SqliteUnitOfWork;

#[derive(FromRow)]
struct ArticleRow {
    id: i64,
    slug: String,
    title: String,
    body: String,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at_unix: i64,
}

impl ArticleRow {
    fn into_article(self) -> Article {
        Article::restore(
            ArticleId::new(self.id),
            self.slug,
            self.title,
            self.body,
            AccountId::new(self.author_id),
            self.created_at,
            self.updated_at,
            self.deleted_at_unix,
        )
    }
}

pub struct SqliteArticleRepository {
    pool: Arc<SqlitePool>,
    uow: SqliteUnitOfWork,
}

impl SqliteArticleRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            uow: SqliteUnitOfWork::new(Arc::clone(&pool)),
            pool,
        }
    }
}

#[async_trait]
impl UnitOfWork for SqliteArticleRepository {
    async fn run_in_tx(&self, ctx: &RequestContext, f: TxCallback) -> Result<(), DomainError> {
        self.uow.run_in_tx(ctx, f).await
    }
}

#[async_trait]
impl EntityRepository<Article> for SqliteArticleRepository {
    async fn save(&self, ctx: &RequestContext, record: &mut Article) -> Result<(), DomainError> {
        debug!(slug = record.slug(), "article.save");
        let session = DbSession::resolve(ctx, &self.pool);

        let query = sqlx::query(
            r#"
            INSERT INTO articles (slug, title, body, author_id, created_at, updated_at, deleted_at_unix)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(record.slug())
        .bind(record.title())
        .bind(record.body())
        .bind(record.author_id().as_i64())
        .bind(record.created_at())
        .bind(record.updated_at())
        .bind(record.deleted_at_unix());

        let result = session
            .execute(ctx, query, "save article")
            .await
            .map_err(|err| {
                error!(error = %err, "article.save failed");
                err
            })?;

        record.assign_id(result.last_insert_rowid());
        Ok(())
    }

    async fn find_by_id(&self, ctx: &RequestContext, id: ArticleId) -> Result<Article, DomainError> {
        debug!(%id, "article.find_by_id");
        let session = DbSession::resolve(ctx, &self.pool);

        let query = sqlx::query_as::<_, ArticleRow>(
            r#"
            SELECT id, slug, title, body, author_id, created_at, updated_at, deleted_at_unix
            FROM articles
            WHERE id = ?1 AND deleted_at_unix = 0
            "#,
        )
        .bind(id.as_i64());

        let row = session
            .fetch_optional(ctx, query, "find article by id")
            .await
            .map_err(|err| {
                error!(error = %err, "article.find_by_id failed");
                err
            })?;

        row.map(ArticleRow::into_article).ok_or(DomainError::NotFound)
    }
}
