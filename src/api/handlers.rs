//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, StateResponse, TelemetryQuery, TelemetryRecord};

/// Liveness probe.
///
/// `GET /health` → 200 + `"ok"`
pub async fn get_health() -> &'static str {
    "ok"
}

/// Returns simulation config, KPI report, and latest telemetry record.
///
/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let latest = state.results.last().map(TelemetryRecord::from);

    Json(StateResponse {
        config: state.config.clone(),
        kpi: state.kpi.clone(),
        latest_step: latest,
    })
}

/// Returns telemetry records, optionally filtered by step range.
///
/// `GET /telemetry` → 200 + `Vec<TelemetryRecord>` JSON
/// `GET /telemetry?from=N&to=M` → filtered range (inclusive)
/// `GET /telemetry?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_telemetry(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TelemetryQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let records: Vec<TelemetryRecord> = state
        .results
        .iter()
        .filter(|r| r.step >= from && r.step <= to)
        .map(TelemetryRecord::from)
        .collect();

    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::battery::Connection;
    use crate::sim::kpi::KpiReport;
    use crate::sim::types::{SimConfig, StepResult};

    fn make_test_state() -> Arc<AppState> {
        let config = SimConfig::new(48, 30.0, 42);
        let results: Vec<StepResult> = (0..48)
            .map(|t| StepResult {
                step: t,
                time_min: t as f32 * 30.0,
                connection: Connection::Camera,
                draw_rate: 1.0,
                charger_setting: 0,
                drained: 1.0,
                charged: 0.0,
                charge: 50.0 - t as f32,
                soc: (50.0 - t as f32) / 100.0,
                cumulative_drain: t as f32 + 1.0,
            })
            .collect();
        let kpi = KpiReport::from_results(&results, 100.0);
        Arc::new(AppState {
            config,
            kpi,
            results,
        })
    }

    #[tokio::test]
    async fn health_returns_200() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn state_returns_200() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/state")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json.get("config").is_some());
        assert!(json.get("kpi").is_some());
        assert_eq!(json["latest_step"]["step"], 47);
    }

    #[tokio::test]
    async fn telemetry_returns_all_steps() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/telemetry")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), 48);
    }

    #[tokio::test]
    async fn telemetry_range_query() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/telemetry?from=5&to=10")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(json.len(), 6); // steps 5,6,7,8,9,10
        assert_eq!(json[0]["step"], 5);
        assert_eq!(json[5]["step"], 10);
    }

    #[tokio::test]
    async fn telemetry_invalid_range_returns_400() {
        let app = router(make_test_state());

        let req = Request::builder()
            .uri("/telemetry?from=10&to=5")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json.get("error").is_some());
    }
}
