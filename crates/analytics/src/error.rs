use core_types::{CoreError, RecordId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Mission '{mission_id}' has an unparseable date: {source}")]
    InvalidDate {
        mission_id: RecordId,
        #[source]
        source: CoreError,
    },
}
