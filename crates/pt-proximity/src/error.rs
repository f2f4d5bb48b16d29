use pt_core::{CoreError, EntityId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProximityError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("entity id {0} appears more than once in the working set")]
    DuplicateEntity(EntityId),
}

pub type ProximityResult<T> = Result<T, ProximityError>;
