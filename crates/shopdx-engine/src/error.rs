//! Engine Error Model
use shopdx_catalog::CatalogError;
use shopdx_core::InputError;
use shopdx_policy::PlaybookError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Playbook(#[from] PlaybookError),

    #[error("CONFIG/{0}")]
    Config(String),

    #[error("WORKER/{0}")]
    Worker(String),
}
