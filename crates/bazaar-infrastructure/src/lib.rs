// Infrastructure layer - SQLite persistence, cache store and logging.

pub mod cache;
pub mod logging;
pub mod persistence;
