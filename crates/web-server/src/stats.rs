use analytics::{MissionStats, StatsEngine};
use async_trait::async_trait;
use database::{DbError, MissionRepository};
use std::sync::Arc;

/// Supplies the current `MissionStats` to the dashboard endpoint.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn fetch(&self) -> Result<MissionStats, DbError>;
}

/// Computes statistics from a fresh snapshot of the mission repository on every call.
pub struct RepositoryStatsSource {
    missions: Arc<dyn MissionRepository>,
    engine: StatsEngine,
}

impl RepositoryStatsSource {
    pub fn new(missions: Arc<dyn MissionRepository>) -> Self {
        Self {
            missions,
            engine: StatsEngine::new(),
        }
    }
}

#[async_trait]
impl StatsSource for RepositoryStatsSource {
    async fn fetch(&self) -> Result<MissionStats, DbError> {
        let snapshot = self.missions.list().await?;
        Ok(self.engine.compute_stats(&snapshot))
    }
}
