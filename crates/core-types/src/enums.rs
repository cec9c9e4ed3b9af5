use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The lifecycle status of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissionStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl MissionStatus {
    pub const ALL: [MissionStatus; 4] = [
        MissionStatus::Pending,
        MissionStatus::InProgress,
        MissionStatus::Completed,
        MissionStatus::Failed,
    ];

    /// Returns the wire name of the status (e.g. `"in-progress"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionStatus::Pending => "pending",
            MissionStatus::InProgress => "in-progress",
            MissionStatus::Completed => "completed",
            MissionStatus::Failed => "failed",
        }
    }

    /// `completed` and `failed` admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MissionStatus::Completed | MissionStatus::Failed)
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MissionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::InvalidInput("mission status".to_string(), s.to_string()))
    }
}

/// The priority tier of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionPriority {
    High,
    Medium,
    Low,
}

impl MissionPriority {
    pub const ALL: [MissionPriority; 3] = [
        MissionPriority::High,
        MissionPriority::Medium,
        MissionPriority::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MissionPriority::High => "high",
            MissionPriority::Medium => "medium",
            MissionPriority::Low => "low",
        }
    }
}

impl fmt::Display for MissionPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissionPriority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MissionPriority::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| CoreError::InvalidInput("mission priority".to_string(), s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrewStatus {
    Active,
    Inactive,
}

impl CrewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrewStatus::Active => "active",
            CrewStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for CrewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrewStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CrewStatus::Active),
            "inactive" => Ok(CrewStatus::Inactive),
            other => Err(CoreError::InvalidInput("crew status".to_string(), other.to_string())),
        }
    }
}
