use std::sync::Arc;

use bazaar_domain::article::Article;
use bazaar_domain::merchant::Merchant;
use bazaar_domain::shared::{CacheStore, EntityRepository};
use bazaar_domain::{DomainError, RequestContext};
use bazaar_infrastructure::cache::InMemoryCacheStore;
use bazaar_infrastructure::persistence::repositories::{
    article_repository, merchant_repository, SqliteArticleRepository,
};

mod test_helpers;

#[tokio::test]
async fn merchant_roundtrip_through_the_factory() {
    let (_dir, pool) = test_helpers::setup_database().await;
    let user_id = test_helpers::seed_account(&pool, "shop@example.com").await;
    let repo = merchant_repository(Arc::clone(&pool), None);
    let ctx = RequestContext::new();

    let mut merchant = Merchant::new("corner shop", user_id);
    repo.save(&ctx, &mut merchant).await.expect("save");

    let found = repo.find_by_id(&ctx, merchant.id()).await.expect("find");
    assert_eq!(found.name(), "corner shop");
    assert_eq!(found.user_id(), user_id);

    let mut closed = Merchant::new("closed shop", user_id);
    closed.soft_delete();
    repo.save(&ctx, &mut closed).await.expect("save closed");
    let err = repo
        .find_by_id(&ctx, closed.id())
        .await
        .expect_err("soft-deleted merchant must be hidden");
    assert!(matches!(err, DomainError::NotFound));
}

#[tokio::test]
async fn colliding_slugs_are_a_key_conflict() {
    let (_dir, pool) = test_helpers::setup_database().await;
    let author_id = test_helpers::seed_account(&pool, "author@example.com").await;
    let repo = SqliteArticleRepository::new(Arc::clone(&pool));
    let ctx = RequestContext::new();

    let mut first = Article::new("One Weird Trick", "body", author_id);
    repo.save(&ctx, &mut first).await.expect("first save");

    // Same title, same slug.
    let mut second = Article::new("One Weird Trick", "other body", author_id);
    let err = repo
        .save(&ctx, &mut second)
        .await
        .expect_err("slug must collide");
    assert!(matches!(err, DomainError::KeyConflict));
}

#[tokio::test]
async fn soft_deleted_article_is_not_found() {
    let (_dir, pool) = test_helpers::setup_database().await;
    let author_id = test_helpers::seed_account(&pool, "retired@example.com").await;
    let repo = SqliteArticleRepository::new(Arc::clone(&pool));
    let ctx = RequestContext::new();

    let mut article = Article::new("Retracted", "body", author_id);
    article.soft_delete();
    assert!(article.is_deleted());
    repo.save(&ctx, &mut article).await.expect("save");

    let err = repo
        .find_by_id(&ctx, article.id())
        .await
        .expect_err("retracted article must be hidden");
    assert!(matches!(err, DomainError::NotFound));
}

#[tokio::test]
async fn cache_decorated_factory_serves_hits_without_storage() {
    let (_dir, pool) = test_helpers::setup_database().await;
    let user_id = test_helpers::seed_account(&pool, "cached@example.com").await;
    let store: Arc<dyn CacheStore> = Arc::new(InMemoryCacheStore::new());
    let repo = merchant_repository(Arc::clone(&pool), Some(Arc::clone(&store)));
    let ctx = RequestContext::new();

    let mut merchant = Merchant::new("hot shop", user_id);
    repo.save(&ctx, &mut merchant).await.expect("save");
    repo.find_by_id(&ctx, merchant.id()).await.expect("populate");

    // Remove the row behind the cache's back; a hit never reaches storage.
    sqlx::query("DELETE FROM merchants WHERE id = ?1")
        .bind(merchant.id().as_i64())
        .execute(pool.as_ref())
        .await
        .expect("delete row");

    let hit = repo
        .find_by_id(&ctx, merchant.id())
        .await
        .expect("served from cache");
    assert_eq!(hit.name(), "hot shop");
}

#[tokio::test]
async fn article_cache_populates_only_on_success() {
    let (_dir, pool) = test_helpers::setup_database().await;
    let author_id = test_helpers::seed_account(&pool, "writer@example.com").await;
    let store: Arc<dyn CacheStore> = Arc::new(InMemoryCacheStore::new());
    let repo = article_repository(Arc::clone(&pool), Some(Arc::clone(&store)));
    let ctx = RequestContext::new();

    let mut article = Article::new("Cache Me If You Can", "body", author_id);
    repo.save(&ctx, &mut article).await.expect("save");

    let key = format!("article:{}", article.id());
    assert!(
        store.get(&key).await.expect("store get").is_none(),
        "save must invalidate, never populate"
    );

    repo.find_by_id(&ctx, article.id()).await.expect("read");
    assert!(
        store.get(&key).await.expect("store get").is_some(),
        "successful read populates the cache"
    );
}
