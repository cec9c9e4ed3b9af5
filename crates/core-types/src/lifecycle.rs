//! Mission lifecycle transitions.
//!
//! ```text
//! pending      --start-->    in-progress
//! in-progress  --pause-->    pending
//! in-progress  --complete--> completed   (sets end_date = now)
//! non-terminal --fail-->     failed
//! ```
//!
//! `completed` and `failed` are terminal.

use crate::enums::MissionStatus;
use crate::error::CoreError;
use crate::structs::MissionRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A user-initiated lifecycle action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionAction {
    Start,
    Pause,
    Complete,
    Fail,
}

impl MissionAction {
    /// The status a mission ends up in after this action.
    pub fn target(&self) -> MissionStatus {
        match self {
            MissionAction::Start => MissionStatus::InProgress,
            MissionAction::Pause => MissionStatus::Pending,
            MissionAction::Complete => MissionStatus::Completed,
            MissionAction::Fail => MissionStatus::Failed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MissionAction::Start => "start",
            MissionAction::Pause => "pause",
            MissionAction::Complete => "complete",
            MissionAction::Fail => "fail",
        }
    }
}

impl fmt::Display for MissionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissionAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(MissionAction::Start),
            "pause" => Ok(MissionAction::Pause),
            "complete" => Ok(MissionAction::Complete),
            "fail" => Ok(MissionAction::Fail),
            other => Err(CoreError::InvalidInput("mission action".to_string(), other.to_string())),
        }
    }
}

/// Returns `true` when the lifecycle table allows moving from `from` to `to`.
pub fn can_transition(from: MissionStatus, to: MissionStatus) -> bool {
    use MissionStatus::*;
    match (from, to) {
        (Pending, InProgress) => true,
        (InProgress, Pending) => true,
        (InProgress, Completed) => true,
        (from, Failed) => !from.is_terminal(),
        _ => false,
    }
}

/// Applies `action` to `mission`, stamping `now` as the end date on completion.
///
/// An illegal transition leaves the record untouched.
pub fn apply_action(
    mission: &mut MissionRecord,
    action: MissionAction,
    now: DateTime<Utc>,
) -> Result<(), CoreError> {
    let to = action.target();
    if !can_transition(mission.status, to) {
        return Err(CoreError::InvalidTransition {
            from: mission.status,
            to,
        });
    }

    tracing::debug!(mission_id = %mission.id, from = %mission.status, to = %to, "Applying mission transition.");
    mission.status = to;
    if action == MissionAction::Complete {
        mission.end_date = Some(now.into());
    }
    Ok(())
}

pub fn start(mission: &mut MissionRecord) -> Result<(), CoreError> {
    apply_action(mission, MissionAction::Start, Utc::now())
}

pub fn pause(mission: &mut MissionRecord) -> Result<(), CoreError> {
    apply_action(mission, MissionAction::Pause, Utc::now())
}

pub fn complete(mission: &mut MissionRecord, now: DateTime<Utc>) -> Result<(), CoreError> {
    apply_action(mission, MissionAction::Complete, now)
}

pub fn fail(mission: &mut MissionRecord) -> Result<(), CoreError> {
    apply_action(mission, MissionAction::Fail, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::MissionPriority;
    use chrono::TimeZone;

    fn mission(status: MissionStatus) -> MissionRecord {
        MissionRecord::new(1_u64, "Lunar Base", status, MissionPriority::Medium, "2024-03-01")
    }

    #[test]
    fn transition_table() {
        use MissionStatus::*;
        assert!(can_transition(Pending, InProgress));
        assert!(can_transition(InProgress, Pending));
        assert!(can_transition(InProgress, Completed));
        assert!(can_transition(Pending, Failed));
        assert!(can_transition(InProgress, Failed));

        assert!(!can_transition(Completed, InProgress));
        assert!(!can_transition(Pending, Completed));
        assert!(!can_transition(Completed, Failed));
        assert!(!can_transition(Failed, Pending));
        assert!(!can_transition(Failed, Failed));
        for status in MissionStatus::ALL {
            assert!(!can_transition(status, status));
        }
    }

    #[test]
    fn complete_sets_end_date_to_now() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
        let mut m = mission(MissionStatus::InProgress);

        complete(&mut m, now).unwrap();

        assert_eq!(m.status, MissionStatus::Completed);
        assert_eq!(m.end_date.unwrap().to_datetime().unwrap(), now);
    }

    #[test]
    fn start_then_pause_returns_to_pending() {
        let mut m = mission(MissionStatus::Pending);
        start(&mut m).unwrap();
        assert_eq!(m.status, MissionStatus::InProgress);
        pause(&mut m).unwrap();
        assert_eq!(m.status, MissionStatus::Pending);
        assert!(m.end_date.is_none());
    }

    #[test]
    fn illegal_transition_leaves_record_untouched() {
        let mut m = mission(MissionStatus::Completed).with_end_date("2024-04-01");
        let before = m.clone();

        let err = start(&mut m).unwrap_err();

        assert_eq!(
            err,
            CoreError::InvalidTransition {
                from: MissionStatus::Completed,
                to: MissionStatus::InProgress,
            }
        );
        assert_eq!(m, before);
    }

    #[test]
    fn fail_is_allowed_from_any_non_terminal_status() {
        let mut pending = mission(MissionStatus::Pending);
        fail(&mut pending).unwrap();
        assert_eq!(pending.status, MissionStatus::Failed);

        let mut failed = mission(MissionStatus::Failed);
        assert!(fail(&mut failed).is_err());
    }

    #[test]
    fn actions_parse_from_path_segments() {
        assert_eq!("complete".parse::<MissionAction>().unwrap(), MissionAction::Complete);
        assert!("resume".parse::<MissionAction>().is_err());
    }
}
