use vaxrecord_core::error::CoreError;

/// Failure of a mutating repository call.
///
/// Domain outcomes (missing target, dangling foreign key) are reported as
/// [`CoreError`]; anything raised by the driver stays a [`sqlx::Error`].
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl RepoError {
    pub(crate) fn not_found(entity: &'static str, id: vaxrecord_core::types::DbId) -> Self {
        RepoError::Core(CoreError::NotFound { entity, id })
    }

    pub(crate) fn invalid_reference(entity: &'static str, id: vaxrecord_core::types::DbId) -> Self {
        RepoError::Core(CoreError::InvalidReference { entity, id })
    }

    pub(crate) fn inconsistent(detail: String) -> Self {
        RepoError::Core(CoreError::Inconsistent(detail))
    }
}
