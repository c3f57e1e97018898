pub mod repositories;
pub mod unit_of_work;

mod database;
mod errors;
mod handle;

pub use database::Database;
pub use unit_of_work::SqliteUnitOfWork;
