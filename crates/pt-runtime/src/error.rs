use pt_proximity::ProximityError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no tokio runtime is active; start() must be called from within one")]
    NoRuntime,

    #[error(transparent)]
    Proximity(#[from] ProximityError),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
