use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::AUTHORIZATION},
};
use core_types::{CrewRecord, CrewStatus, MissionPriority, MissionRecord, MissionStatus, RecordId};
use database::InMemoryRepository;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use web_server::{AllowAll, AppState, BearerTokenPolicy, build_router};

fn app() -> Router {
    let state = AppState::new(InMemoryRepository::with_sample_data(), Arc::new(AllowAll));
    build_router(Arc::new(state))
}

async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_check_is_open() {
    let response = app()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn lists_all_missions() {
    let (status, body) = send(app(), "GET", "/missions").await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        titles,
        vec!["Mars Exploration", "Lunar Base Construction", "Asteroid Mining"]
    );
}

#[tokio::test]
async fn filters_missions_by_query() {
    let (status, body) = send(app(), "GET", "/missions?priority=high&status=completed").await;
    assert_eq!(status, StatusCode::OK);
    let missions = body.as_array().unwrap();
    assert_eq!(missions.len(), 1);
    assert_eq!(missions[0]["id"], 3);
}

#[tokio::test]
async fn stats_route_is_not_shadowed_by_id_route() {
    let (status, body) = send(app(), "GET", "/missions/stats").await;
    assert_eq!(status, StatusCode::OK);
    // One completed (70 days) and one in progress.
    assert_eq!(
        body,
        json!({
            "totalMissions": 3,
            "activeMissions": 1,
            "successRate": 50,
            "averageDuration": 70_u64 * 86_400_000,
            "priorityDistribution": { "high": 2, "medium": 1, "low": 0 }
        })
    );
}

#[tokio::test]
async fn fetches_single_mission_or_404() {
    let (status, body) = send(app(), "GET", "/missions/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["crewMembers"], json!([4, 5]));

    let (status, body) = send(app(), "GET", "/missions/404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("404"));
}

#[tokio::test]
async fn reports_duration_in_days() {
    let (status, body) = send(app(), "GET", "/missions/3/duration").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": 3, "days": 70 }));

    let (_, body) = send(app(), "GET", "/missions/1/duration").await;
    assert_eq!(body["days"], 0);
}

#[tokio::test]
async fn lifecycle_actions_update_stats() {
    let app = app();

    let (status, body) = send(app.clone(), "POST", "/missions/2/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "in-progress");

    let (status, body) = send(app.clone(), "POST", "/missions/1/complete").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
    assert!(body["endDate"].is_string());

    let (_, stats) = send(app, "GET", "/missions/stats").await;
    assert_eq!(stats["activeMissions"], 1);
    // two completed, one in progress -> 66.67% -> 67
    assert_eq!(stats["successRate"], 67);
}

#[tokio::test]
async fn illegal_transition_is_a_conflict() {
    let (status, body) = send(app(), "POST", "/missions/3/start").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("completed"));
}

#[tokio::test]
async fn unknown_action_or_mission_is_rejected() {
    let (status, _) = send(app(), "POST", "/missions/1/launch").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(app(), "POST", "/missions/77/start").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn crew_queries() {
    let (status, body) = send(app(), "GET", "/crew").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);

    let (_, body) = send(app(), "GET", "/crew/4").await;
    assert_eq!(body["name"], "Emma Wilson");

    let (status, _) = send(app(), "GET", "/crew/40").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(app(), "GET", "/crew/status/inactive").await;
    assert_eq!(body, json!([{
        "id": 4,
        "name": "Emma Wilson",
        "role": "Pilot",
        "specialization": "Flight Operations",
        "status": "inactive",
        "missions": [2]
    }]));

    let (status, _) = send(app(), "GET", "/crew/status/retired").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(app(), "GET", "/crew/mission/3").await;
    let ids: Vec<_> = body.as_array().unwrap().iter().map(|c| c["id"].clone()).collect();
    assert_eq!(ids, vec![json!(1), json!(3), json!(5)]);
}

#[tokio::test]
async fn bearer_policy_guards_mission_routes_only() {
    let state = AppState::new(
        InMemoryRepository::with_sample_data(),
        Arc::new(BearerTokenPolicy::new("s3cret")),
    );
    let app = build_router(Arc::new(state));

    let (status, body) = send(app.clone(), "GET", "/missions/stats").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let authorized = Request::get("/missions/stats")
        .header(AUTHORIZATION, "Bearer s3cret")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(authorized).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, _) = send(app, "GET", "/crew").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn bad_filter_values_get_a_json_error() {
    let (status, body) = send(app(), "GET", "/missions?status=bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("bogus"));

    let (status, body) = send(app(), "GET", "/missions?priority=urgent").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

/// A store whose ids are digit strings, as a browser client would send them.
fn text_id_app() -> Router {
    let missions = vec![
        MissionRecord::new(
            RecordId::from("1"),
            "Europa Probe",
            MissionStatus::Pending,
            MissionPriority::Low,
            "2024-02-01",
        )
        .with_crew([RecordId::from("7")]),
    ];
    let crew = vec![CrewRecord {
        id: RecordId::from("7"),
        name: "Ana Ruiz".to_string(),
        role: "Engineer".to_string(),
        specialization: "Propulsion".to_string(),
        status: CrewStatus::Active,
        missions: vec![RecordId::from("1")],
    }];
    let state = AppState::new(InMemoryRepository::new(missions, crew), Arc::new(AllowAll));
    build_router(Arc::new(state))
}

#[tokio::test]
async fn digit_text_ids_resolve_through_path_routes() {
    let app = text_id_app();

    let (status, body) = send(app.clone(), "GET", "/missions/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "1");

    let (status, body) = send(app.clone(), "GET", "/missions/1/duration").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "1");

    let (status, body) = send(app.clone(), "POST", "/missions/1/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "in-progress");

    let (status, body) = send(app.clone(), "GET", "/crew/7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ana Ruiz");

    let (_, body) = send(app.clone(), "GET", "/crew/mission/1").await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(app, "GET", "/missions/2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
