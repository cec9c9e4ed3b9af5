use crate::enums::{CrewStatus, MissionPriority, MissionStatus};
use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque record identifier.
///
/// Records coming from the wire may carry either numeric or textual ids. The two
/// forms are never considered equal to each other (`1` is not `"1"`), but
/// `FromStr` maps all-digit input to the numeric form so that path parameters
/// resolve the way callers expect.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{id}"),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

impl FromStr for RecordId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(CoreError::InvalidInput("record id".to_string(), s.to_string()));
        }
        Ok(s.parse::<u64>()
            .map(RecordId::Int)
            .unwrap_or_else(|_| RecordId::Text(s.to_string())))
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

/// A calendar date or date-time as supplied by the caller.
///
/// The raw text is kept verbatim and parsed on demand, so a single malformed
/// record can be carried through the system without rejecting the whole
/// collection it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionDate(String);

impl MissionDate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the date into a UTC instant.
    ///
    /// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) and a
    /// bare `YYYY-MM-DD` (midnight UTC).
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, CoreError> {
        let raw = self.0.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(naive.and_utc());
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(midnight.and_utc());
            }
        }
        Err(CoreError::InvalidInput("date".to_string(), self.0.clone()))
    }
}

impl From<DateTime<Utc>> for MissionDate {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl From<&str> for MissionDate {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// A task record with a lifecycle status, a priority and a time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionRecord {
    pub id: RecordId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: MissionStatus,
    pub priority: MissionPriority,
    pub start_date: MissionDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<MissionDate>,
    #[serde(default)]
    pub crew_members: Vec<RecordId>,
}

impl MissionRecord {
    /// Creates a mission with no description, no end date and no crew.
    pub fn new(
        id: impl Into<RecordId>,
        title: impl Into<String>,
        status: MissionStatus,
        priority: MissionPriority,
        start_date: impl Into<MissionDate>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status,
            priority,
            start_date: start_date.into(),
            end_date: None,
            crew_members: Vec::new(),
        }
    }

    pub fn with_end_date(mut self, end_date: impl Into<MissionDate>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_crew(mut self, crew: impl IntoIterator<Item = RecordId>) -> Self {
        self.crew_members = crew.into_iter().collect();
        self
    }
}

/// A person record linkable to one or more missions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewRecord {
    pub id: RecordId,
    pub name: String,
    pub role: String,
    pub specialization: String,
    pub status: CrewStatus,
    #[serde(default)]
    pub missions: Vec<RecordId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn record_id_accepts_numbers_and_strings() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[1, "alpha"]"#).unwrap();
        assert_eq!(ids, vec![RecordId::Int(1), RecordId::Text("alpha".to_string())]);
    }

    #[test]
    fn record_id_from_str_prefers_numeric_form() {
        assert_eq!("42".parse::<RecordId>().unwrap(), RecordId::Int(42));
        assert_eq!("m-7".parse::<RecordId>().unwrap(), RecordId::from("m-7"));
        assert!("".parse::<RecordId>().is_err());
    }

    #[test]
    fn mission_date_parses_supported_forms() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let noon = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        assert_eq!(MissionDate::from("2024-01-01").to_datetime().unwrap(), midnight);
        assert_eq!(MissionDate::from("2024-01-01T12:00:00").to_datetime().unwrap(), noon);
        assert_eq!(MissionDate::from("2024-01-01T12:00:00Z").to_datetime().unwrap(), noon);
        assert_eq!(
            MissionDate::from("2024-01-01T14:00:00+02:00").to_datetime().unwrap(),
            noon
        );
    }

    #[test]
    fn mission_date_rejects_garbage() {
        assert!(MissionDate::from("next tuesday").to_datetime().is_err());
        assert!(MissionDate::from("2024-13-45").to_datetime().is_err());
    }

    #[test]
    fn mission_date_round_trips_through_datetime() {
        let now = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
        assert_eq!(MissionDate::from(now).to_datetime().unwrap(), now);
    }

    #[test]
    fn mission_record_uses_camel_case_and_omits_missing_end_date() {
        let mission = MissionRecord::new(
            1_u64,
            "Mars Exploration",
            MissionStatus::InProgress,
            MissionPriority::High,
            "2024-01-15",
        )
        .with_crew([RecordId::Int(1), RecordId::Int(2)]);

        let value = serde_json::to_value(&mission).unwrap();
        assert_eq!(value["startDate"], "2024-01-15");
        assert_eq!(value["status"], "in-progress");
        assert_eq!(value["crewMembers"], serde_json::json!([1, 2]));
        assert!(value.get("endDate").is_none());
    }
}
