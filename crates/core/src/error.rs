use crate::types::DbId;

/// Domain-level failures shared by the repository and HTTP layers.
///
/// The first three variants are client errors; the HTTP boundary collapses
/// them into one wire shape while keeping the kind in the `code` field.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Invalid reference: {entity} with id {id} does not exist")]
    InvalidReference { entity: &'static str, id: DbId },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A parent row expected by a projection is missing.
    #[error("Inconsistent state: {0}")]
    Inconsistent(String),
}

impl CoreError {
    /// Whether the error is caused by the caller rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::NotFound { .. }
                | CoreError::InvalidReference { .. }
                | CoreError::InvalidInput(_)
        )
    }
}
