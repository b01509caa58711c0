//! Classification of database errors.

use crate::domain::errors::StorageError;

/// Returns true if the error is a unique-constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

/// Maps an insert error, turning unique violations into [`StorageError::Conflict`].
pub fn map_insert_error(e: sqlx::Error) -> StorageError {
    if is_unique_violation(&e) {
        StorageError::Conflict
    } else {
        StorageError::Database(e)
    }
}
