use thiserror::Error;

/// Failure reported by the database driver while running a user statement.
///
/// Connection, prepare, execute and row decoding failures all land here
/// unchanged; constraint violations are not classified at this layer.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct PersistenceError(#[from] sqlx::Error);

impl PersistenceError {
    pub fn into_inner(self) -> sqlx::Error {
        self.0
    }
}
