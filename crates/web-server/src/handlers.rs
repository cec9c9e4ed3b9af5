use crate::{AppState, error::AppError};
use analytics::MissionStats;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use core_types::{
    CrewRecord, CrewStatus, MissionAction, MissionPriority, MissionRecord, MissionStatus, RecordId,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Raw query parameters; values are parsed in the handler so that a bad value
/// is reported with the usual JSON error body.
#[derive(Debug, Deserialize)]
pub struct MissionFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionDuration {
    pub id: RecordId,
    pub days: u64,
}

/// # GET /missions
/// Optional `?status=` and `?priority=` narrow the list; order is preserved.
pub async fn list_missions(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<MissionFilter>,
) -> Result<Json<Vec<MissionRecord>>, AppError> {
    let status = filter.status.as_deref().map(str::parse::<MissionStatus>).transpose()?;
    let priority = filter.priority.as_deref().map(str::parse::<MissionPriority>).transpose()?;

    let mut missions = state.missions.list().await?;
    if let Some(status) = status {
        missions = state.engine.filter_by_status(&missions, status);
    }
    if let Some(priority) = priority {
        missions = state.engine.filter_by_priority(&missions, priority);
    }
    Ok(Json(missions))
}

/// The ids a path segment may refer to.
///
/// All-digit segments parse to the numeric form, but a record may just as well
/// carry the same digits as a text id, so that form is tried second.
fn id_candidates(raw: &str) -> Result<Vec<RecordId>, AppError> {
    let parsed: RecordId = raw.parse()?;
    let mut ids = vec![parsed.clone()];
    if matches!(parsed, RecordId::Int(_)) {
        ids.push(RecordId::Text(raw.to_string()));
    }
    Ok(ids)
}

async fn find_mission(state: &AppState, raw: &str) -> Result<MissionRecord, AppError> {
    for id in id_candidates(raw)? {
        if let Some(mission) = state.missions.get_by_id(&id).await? {
            return Ok(mission);
        }
    }
    Err(AppError::NotFound(format!("Mission '{raw}' not found")))
}

/// # GET /missions/stats
pub async fn get_mission_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MissionStats>, AppError> {
    let stats = state.stats.fetch().await?;
    Ok(Json(stats))
}

/// # GET /missions/:id
pub async fn get_mission(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MissionRecord>, AppError> {
    let mission = find_mission(&state, &id).await?;
    Ok(Json(mission))
}

/// # GET /missions/:id/duration
/// The mission's length in whole days, partial days rounded up.
pub async fn get_mission_duration(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MissionDuration>, AppError> {
    let mission = find_mission(&state, &id).await?;
    let days = state.engine.compute_duration(&mission);
    Ok(Json(MissionDuration {
        id: mission.id,
        days,
    }))
}

/// # POST /missions/:id/:action
/// `action` is one of `start`, `pause`, `complete`, `fail`.
pub async fn apply_mission_action(
    Path((id, action)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MissionRecord>, AppError> {
    let action: MissionAction = action.parse()?;
    let mission = find_mission(&state, &id).await?;
    let updated = state
        .missions
        .apply_action(&mission.id, action, Utc::now())
        .await?;
    Ok(Json(updated))
}

/// # GET /crew
pub async fn list_crew(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CrewRecord>>, AppError> {
    let crew = state.crew.list().await?;
    Ok(Json(crew))
}

/// # GET /crew/:id
pub async fn get_crew_member(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<CrewRecord>, AppError> {
    for candidate in id_candidates(&id)? {
        if let Some(member) = state.crew.get_by_id(&candidate).await? {
            return Ok(Json(member));
        }
    }
    Err(AppError::NotFound(format!("Crew member '{id}' not found")))
}

/// # GET /crew/status/:status
pub async fn get_crew_by_status(
    Path(status): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CrewRecord>>, AppError> {
    let status: CrewStatus = status.parse()?;
    let crew = state.crew.list().await?;
    Ok(Json(state.engine.filter_crew_by_status(&crew, status)))
}

/// # GET /crew/mission/:mission_id
pub async fn get_crew_by_mission(
    Path(mission_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CrewRecord>>, AppError> {
    let crew = state.crew.list().await?;
    for candidate in id_candidates(&mission_id)? {
        let assigned = state.engine.filter_crew_by_mission(&crew, &candidate);
        if !assigned.is_empty() {
            return Ok(Json(assigned));
        }
    }
    Ok(Json(Vec::new()))
}
