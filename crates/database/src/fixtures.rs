use crate::error::DbError;
use core_types::{CrewRecord, CrewStatus, MissionPriority, MissionRecord, MissionStatus, RecordId};
use serde::de::DeserializeOwned;
use std::path::Path;

/// The illustrative missions served when no fixture file is configured.
pub fn sample_missions() -> Vec<MissionRecord> {
    vec![
        MissionRecord::new(RecordId::Int(1), "Mars Exploration", MissionStatus::InProgress, MissionPriority::High, "2024-01-15")
            .with_description("Initial survey of potential landing sites on Mars")
            .with_crew(ids(&[1, 2, 3])),
        MissionRecord::new(RecordId::Int(2), "Lunar Base Construction", MissionStatus::Pending, MissionPriority::Medium, "2024-03-01")
            .with_description("Phase 1 of lunar base construction")
            .with_crew(ids(&[4, 5])),
        MissionRecord::new(RecordId::Int(3), "Asteroid Mining", MissionStatus::Completed, MissionPriority::High, "2023-11-01")
            .with_description("Test mining operations on near-Earth asteroid")
            .with_end_date("2024-01-10")
            .with_crew(ids(&[1, 3, 5])),
    ]
}

/// The crew roster matching [`sample_missions`].
pub fn sample_crew() -> Vec<CrewRecord> {
    vec![
        crew_member(1, "John Smith", "Commander", "Navigation", CrewStatus::Active, &[1, 3]),
        crew_member(2, "Sarah Johnson", "Engineer", "Systems", CrewStatus::Active, &[1]),
        crew_member(3, "Michael Chen", "Scientist", "Research", CrewStatus::Active, &[1, 3]),
        crew_member(4, "Emma Wilson", "Pilot", "Flight Operations", CrewStatus::Inactive, &[2]),
        crew_member(5, "David Brown", "Engineer", "Construction", CrewStatus::Active, &[2, 3]),
    ]
}

/// Reads a JSON array of missions from `path`.
pub fn load_missions(path: &Path) -> Result<Vec<MissionRecord>, DbError> {
    read_json(path)
}

/// Reads a JSON array of crew members from `path`.
pub fn load_crew(path: &Path) -> Result<Vec<CrewRecord>, DbError> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DbError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DbError::FixtureIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DbError::FixtureFormat {
        path: path.to_path_buf(),
        source,
    })
}

fn ids(raw: &[u64]) -> Vec<RecordId> {
    raw.iter().copied().map(RecordId::Int).collect()
}

fn crew_member(
    id: u64,
    name: &str,
    role: &str,
    specialization: &str,
    status: CrewStatus,
    missions: &[u64],
) -> CrewRecord {
    CrewRecord {
        id: RecordId::Int(id),
        name: name.to_string(),
        role: role.to_string(),
        specialization: specialization.to_string(),
        status,
        missions: ids(missions),
    }
}
