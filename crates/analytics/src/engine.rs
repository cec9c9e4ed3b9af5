use crate::error::AnalyticsError;
use crate::report::{MissionStats, PriorityDistribution};
use core_types::{
    CrewRecord, CrewStatus, MissionPriority, MissionRecord, MissionStatus, RecordId,
};
use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

const MILLIS_PER_DAY: u64 = 86_400_000;

/// A stateless calculator for deriving statistics from a snapshot of missions.
///
/// Every method is a pure function of its arguments. The engine never mutates
/// the records it is given and holds no state between calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatsEngine {}

impl StatsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating mission statistics.
    ///
    /// Never fails: empty input and zero denominators yield zeroed fields, and a
    /// mission with an unparseable date contributes a duration of 0.
    pub fn compute_stats(&self, missions: &[MissionRecord]) -> MissionStats {
        MissionStats {
            total_missions: missions.len(),
            active_missions: count_status(missions, MissionStatus::InProgress),
            success_rate: self.success_rate(missions),
            average_duration: self.average_duration_ms(missions),
            priority_distribution: self.priority_distribution(missions),
        }
    }

    /// `round(100 * completed / (completed + in_progress))`, or 0 when neither exists.
    pub fn success_rate(&self, missions: &[MissionRecord]) -> u32 {
        let completed = count_status(missions, MissionStatus::Completed);
        let in_progress = count_status(missions, MissionStatus::InProgress);
        let concluded = completed + in_progress;
        if concluded == 0 {
            return 0;
        }
        round_ratio(Decimal::from(completed * 100), Decimal::from(concluded))
            .to_u32()
            .unwrap_or(0)
    }

    /// Same formula as [`StatsEngine::success_rate`]; kept as its own name for
    /// dashboards that label it "efficiency".
    pub fn efficiency_rate(&self, missions: &[MissionRecord]) -> u32 {
        self.success_rate(missions)
    }

    /// Mean wall-clock duration in milliseconds over completed missions with an end date.
    pub fn average_duration_ms(&self, missions: &[MissionRecord]) -> u64 {
        let qualifying: Vec<&MissionRecord> = missions
            .iter()
            .filter(|m| m.status == MissionStatus::Completed && m.end_date.is_some())
            .collect();

        if qualifying.is_empty() {
            return 0;
        }

        let total_ms: u64 = qualifying
            .iter()
            .map(|m| self.elapsed_or_zero(m))
            .fold(0u64, |acc, ms| acc.saturating_add(ms));

        round_ratio(Decimal::from(total_ms), Decimal::from(qualifying.len()))
            .to_u64()
            .unwrap_or(0)
    }

    pub fn priority_distribution(&self, missions: &[MissionRecord]) -> PriorityDistribution {
        missions
            .iter()
            .fold(PriorityDistribution::default(), |mut dist, m| {
                dist.increment(m.priority);
                dist
            })
    }

    /// Duration of a single mission in whole days, counting any partial day as a full one.
    ///
    /// Returns 0 when the mission has no end date or carries an unparseable date.
    pub fn compute_duration(&self, mission: &MissionRecord) -> u64 {
        self.elapsed_or_zero(mission).div_ceil(MILLIS_PER_DAY)
    }

    /// `|end_date - start_date|` in milliseconds, or `None` without an end date.
    pub fn mission_duration_ms(
        &self,
        mission: &MissionRecord,
    ) -> Result<Option<u64>, AnalyticsError> {
        let Some(end_date) = &mission.end_date else {
            return Ok(None);
        };
        let invalid = |source| AnalyticsError::InvalidDate {
            mission_id: mission.id.clone(),
            source,
        };
        let start = mission.start_date.to_datetime().map_err(invalid)?;
        let end = end_date.to_datetime().map_err(invalid)?;

        Ok(Some((end - start).num_milliseconds().unsigned_abs()))
    }

    pub fn filter_by_status(
        &self,
        missions: &[MissionRecord],
        status: MissionStatus,
    ) -> Vec<MissionRecord> {
        missions.iter().filter(|m| m.status == status).cloned().collect()
    }

    pub fn filter_by_priority(
        &self,
        missions: &[MissionRecord],
        priority: MissionPriority,
    ) -> Vec<MissionRecord> {
        missions.iter().filter(|m| m.priority == priority).cloned().collect()
    }

    /// Returns the first mission whose id matches. Ids are expected to be unique.
    pub fn find_by_id(&self, missions: &[MissionRecord], id: &RecordId) -> Option<MissionRecord> {
        missions.iter().find(|m| &m.id == id).cloned()
    }

    pub fn filter_crew_by_status(&self, crew: &[CrewRecord], status: CrewStatus) -> Vec<CrewRecord> {
        crew.iter().filter(|c| c.status == status).cloned().collect()
    }

    /// All crew members whose mission list contains `mission_id`.
    pub fn filter_crew_by_mission(&self, crew: &[CrewRecord], mission_id: &RecordId) -> Vec<CrewRecord> {
        crew.iter()
            .filter(|c| c.missions.contains(mission_id))
            .cloned()
            .collect()
    }

    pub fn find_crew_by_id(&self, crew: &[CrewRecord], id: &RecordId) -> Option<CrewRecord> {
        crew.iter().find(|c| &c.id == id).cloned()
    }

    fn elapsed_or_zero(&self, mission: &MissionRecord) -> u64 {
        match self.mission_duration_ms(mission) {
            Ok(ms) => ms.unwrap_or(0),
            Err(e) => {
                tracing::warn!(error = %e, "Treating mission duration as zero.");
                0
            }
        }
    }
}

fn count_status(missions: &[MissionRecord], status: MissionStatus) -> usize {
    missions.iter().filter(|m| m.status == status).count()
}

/// Divides and rounds half away from zero to a whole number.
fn round_ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    (numerator / denominator).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
