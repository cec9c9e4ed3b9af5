use crate::DbError;
use crate::fixtures;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_types::{CrewRecord, MissionAction, MissionRecord, RecordId, apply_action};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Read access to the mission collection.
///
/// This is the seam a real persistence layer plugs into; the statistics logic
/// only ever sees the snapshots returned from here.
#[async_trait]
pub trait MissionRepository: Send + Sync {
    /// Returns a snapshot of every mission, in storage order.
    async fn list(&self) -> Result<Vec<MissionRecord>, DbError>;

    async fn get_by_id(&self, id: &RecordId) -> Result<Option<MissionRecord>, DbError>;

    /// Applies a lifecycle action to one mission and returns the updated record.
    async fn apply_action(
        &self,
        id: &RecordId,
        action: MissionAction,
        now: DateTime<Utc>,
    ) -> Result<MissionRecord, DbError>;
}

/// Read access to the crew roster.
#[async_trait]
pub trait CrewRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<CrewRecord>, DbError>;

    async fn get_by_id(&self, id: &RecordId) -> Result<Option<CrewRecord>, DbError>;
}

/// An in-memory store for missions and crew.
///
/// Clones share the same underlying collections. Reads hand out cloned
/// snapshots, so callers never observe a half-applied update.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    missions: Arc<RwLock<Vec<MissionRecord>>>,
    crew: Arc<RwLock<Vec<CrewRecord>>>,
}

impl InMemoryRepository {
    pub fn new(missions: Vec<MissionRecord>, crew: Vec<CrewRecord>) -> Self {
        Self {
            missions: Arc::new(RwLock::new(missions)),
            crew: Arc::new(RwLock::new(crew)),
        }
    }

    /// A repository seeded with the built-in sample missions and crew.
    pub fn with_sample_data() -> Self {
        Self::new(fixtures::sample_missions(), fixtures::sample_crew())
    }

    /// Seeds the repository from JSON fixture files, falling back to the sample
    /// data for whichever file is not given.
    pub fn from_fixture_files(
        missions_file: Option<&Path>,
        crew_file: Option<&Path>,
    ) -> Result<Self, DbError> {
        let missions = match missions_file {
            Some(path) => fixtures::load_missions(path)?,
            None => fixtures::sample_missions(),
        };
        let crew = match crew_file {
            Some(path) => fixtures::load_crew(path)?,
            None => fixtures::sample_crew(),
        };
        tracing::info!(
            missions = missions.len(),
            crew = crew.len(),
            "In-memory repository seeded."
        );
        Ok(Self::new(missions, crew))
    }
}

#[async_trait]
impl MissionRepository for InMemoryRepository {
    async fn list(&self) -> Result<Vec<MissionRecord>, DbError> {
        Ok(self.missions.read().await.clone())
    }

    async fn get_by_id(&self, id: &RecordId) -> Result<Option<MissionRecord>, DbError> {
        let missions = self.missions.read().await;
        Ok(missions.iter().find(|m| &m.id == id).cloned())
    }

    async fn apply_action(
        &self,
        id: &RecordId,
        action: MissionAction,
        now: DateTime<Utc>,
    ) -> Result<MissionRecord, DbError> {
        let mut missions = self.missions.write().await;
        let mission = missions
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| DbError::MissionNotFound(id.clone()))?;

        apply_action(mission, action, now)?;
        tracing::info!(mission_id = %id, action = %action, status = %mission.status, "Mission updated.");
        Ok(mission.clone())
    }
}

#[async_trait]
impl CrewRepository for InMemoryRepository {
    async fn list(&self) -> Result<Vec<CrewRecord>, DbError> {
        Ok(self.crew.read().await.clone())
    }

    async fn get_by_id(&self, id: &RecordId) -> Result<Option<CrewRecord>, DbError> {
        let crew = self.crew.read().await;
        Ok(crew.iter().find(|c| &c.id == id).cloned())
    }
}
