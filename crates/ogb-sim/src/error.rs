//! Driver-level errors.

use thiserror::Error;

use ogb_city::CityError;
use ogb_script::ScriptError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("city {0:?} already exists")]
    DuplicateCity(String),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    City(#[from] CityError),
}

pub type SimResult<T> = Result<T, SimError>;
