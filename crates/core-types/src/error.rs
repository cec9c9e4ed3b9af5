use crate::enums::MissionStatus;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Illegal mission transition from '{from}' to '{to}'")]
    InvalidTransition {
        from: MissionStatus,
        to: MissionStatus,
    },
}
