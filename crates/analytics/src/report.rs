use core_types::MissionPriority;
use serde::{Deserialize, Serialize};

/// Number of missions in each priority tier. All three tiers are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityDistribution {
    pub fn get(&self, priority: MissionPriority) -> usize {
        match priority {
            MissionPriority::High => self.high,
            MissionPriority::Medium => self.medium,
            MissionPriority::Low => self.low,
        }
    }

    pub(crate) fn increment(&mut self, priority: MissionPriority) {
        match priority {
            MissionPriority::High => self.high += 1,
            MissionPriority::Medium => self.medium += 1,
            MissionPriority::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Aggregate statistics over a snapshot of missions.
///
/// This struct is the output of `StatsEngine::compute_stats` and is served as-is
/// by the HTTP layer, hence the camelCase wire names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionStats {
    pub total_missions: usize,
    /// Missions currently `in-progress`.
    pub active_missions: usize,
    /// Integer percentage in `[0, 100]`.
    pub success_rate: u32,
    /// Milliseconds, averaged over completed missions that carry an end date.
    pub average_duration: u64,
    pub priority_distribution: PriorityDistribution,
}
