use std::path::PathBuf;
use thiserror::Error;

/// Conditions that abort a run
#[derive(Debug, Error)]
pub enum Error {
    #[error("{file} not found at {path:?}")]
    MissingInput { file: &'static str, path: PathBuf },

    #[error("cannot compute bounding box: {collection} collection is empty")]
    EmptyInput { collection: &'static str },

    #[error("cannot compute bounding box: no {collection} with a complete 3D position")]
    NoValidPositions { collection: &'static str },
}
