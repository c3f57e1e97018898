use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{AccountId, ArticleId, EntityRecord};

/// A published article. The slug is derived from the title and unique across
/// non-deleted articles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    id: ArticleId,
    slug: String,
    title: String,
    body: String,
    author_id: AccountId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at_unix: i64,
}

impl Article {
    pub fn new(title: impl Into<String>, body: impl Into<String>, author_id: AccountId) -> Self {
        let title = title.into().trim().to_string();
        let now = Utc::now();
        Self {
            id: ArticleId::new(0),
            slug: slugify(&title),
            title,
            body: body.into(),
            author_id,
            created_at: now,
            updated_at: now,
            deleted_at_unix: 0,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ArticleId,
        slug: String,
        title: String,
        body: String,
        author_id: AccountId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at_unix: i64,
    ) -> Self {
        Self {
            id,
            slug,
            title,
            body,
            author_id,
            created_at,
            updated_at,
            deleted_at_unix,
        }
    }

    pub fn id(&self) -> ArticleId {
        self.id
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn author_id(&self) -> AccountId {
        self.author_id
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

fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

impl EntityRecord for Article {
    type Id = ArticleId;

    const KIND: &'static str = "article";

    fn id(&self) -> ArticleId {
        self.id
    }

    fn assign_id(&mut self, raw: i64) {
        self.id = ArticleId::new(raw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_comes_from_the_title() {
        let article = Article::new("How to Train Your Dragon!", "...", AccountId::new(1));
        assert_eq!(article.slug(), "how-to-train-your-dragon");
    }

    #[test]
    fn slug_drops_non_alphanumerics() {
        let article = Article::new("  Déjà vu -- again  ", "...", AccountId::new(1));
        assert_eq!(article.slug(), "dj-vu-again");
    }
}
