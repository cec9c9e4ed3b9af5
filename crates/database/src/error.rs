use core_types::{CoreError, RecordId};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to read fixture file '{path}': {source}")]
    FixtureIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Fixture file '{path}' is not valid JSON: {source}")]
    FixtureFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Mission '{0}' was not found.")]
    MissionNotFound(RecordId),

    #[error(transparent)]
    Transition(#[from] CoreError),
}
