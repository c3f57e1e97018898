// Domain layer - entities, ports and the request context.
// No dependencies on infrastructure or presentation layers.

pub mod account;
pub mod article;
pub mod merchant;
pub mod shared;

// Re-exports for convenience
pub use shared::{AccountId, ArticleId, DomainError, MerchantId, RequestContext};
