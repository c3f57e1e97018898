use bazaar_domain::DomainError;

/// The single point where SQLite errors become domain errors. Everything the
/// repositories surface goes through here, so no sqlx error value ever leaves
/// the persistence module. Swapping the storage engine means swapping this
/// function, not the callers.
pub(crate) fn translate(err: sqlx::Error, op: &str) -> DomainError {
    match &err {
        sqlx::Error::RowNotFound => DomainError::NotFound,
        sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::KeyConflict,
        _ => DomainError::Internal(format!("{}: {}", op, err)),
    }
}
