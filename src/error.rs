use thiserror::Error;

use crate::model::PetId;

/// Why an interaction was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refusal {
    Dead,
    Resting,
    Awake,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InteractionError {
    #[error("interaction not permitted: pet is {0:?}")]
    NotPermitted(Refusal),
    #[error(transparent)]
    House(#[from] HouseError),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HouseError {
    #[error("house is already occupied by pet {0}")]
    Occupied(PetId),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save data is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}
