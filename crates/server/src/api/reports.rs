use crate::{api::ApiError, dto::CreateReportDto, state::AppState};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, info, warn};
use vigie::reports::{NewReport, Report};

pub async fn list_markers(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let store = state.store.clone();
    let reports = tokio::task::spawn_blocking(move || store.list())
        .await
        .map_err(|err| {
            error!("Listing task failed: {err}");
            ApiError::internal()
        })?
        .map_err(|err| {
            error!("Failed to list reports: {err}");
            ApiError::internal()
        })?;
    Ok(Json(reports).into_response())
}

pub async fn create_marker(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let report = CreateReportDto::parse(&body)
        .and_then(CreateReportDto::into_new_report)
        .map_err(|message| {
            warn!("Rejected report: {message}");
            ApiError::bad_request(message)
        })?;

    let report = create(&state, report).await?;
    info!(
        "Report {} ({}) at {}, {}",
        report.id, report.category, report.lat, report.lng
    );
    Ok((StatusCode::CREATED, Json(report)).into_response())
}

async fn create(state: &AppState, report: NewReport) -> Result<Report, ApiError> {
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || store.create(report))
        .await
        .map_err(|err| {
            error!("Create task failed: {err}");
            ApiError::internal()
        })?
        .map_err(|err| {
            if err.is_validation() {
                warn!("Rejected report: {err}");
                ApiError::bad_request(err.to_string())
            } else {
                error!("Failed to store report: {err}");
                ApiError::internal()
            }
        })
}

#[cfg(test)]
mod tests {
    use crate::{api::router, state::AppState};
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use serde_json::Value;
    use std::{io, sync::Arc};
    use tower::ServiceExt;
    use vigie::{
        network::Network,
        reports::{Error, MemoryStore, NewReport, Report, ReportStore},
        shared::Distance,
    };

    struct Unwritable;

    impl ReportStore for Unwritable {
        fn list(&self) -> Result<Vec<Report>, Error> {
            Err(io::Error::other("disk unreadable").into())
        }

        fn create(&self, report: NewReport) -> Result<Report, Error> {
            report.validate()?;
            Err(io::Error::other("disk full").into())
        }
    }

    fn state(store: Arc<dyn ReportStore>) -> Arc<AppState> {
        Arc::new(AppState {
            network: Network::new(),
            store,
            radius: Distance::from_meters(150.0),
        })
    }

    async fn post(state: Arc<AppState>, body: &str) -> Response {
        let request = Request::post("/api/markers")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        router(state).oneshot(request).await.unwrap()
    }

    async fn get(state: Arc<AppState>) -> Response {
        let request = Request::get("/api/markers").body(Body::empty()).unwrap();
        router(state).oneshot(request).await.unwrap()
    }

    async fn json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn created_marker_is_listed() {
        let state = state(Arc::new(MemoryStore::new()));

        let response = post(
            state.clone(),
            r#"{"lat": 45.7578, "lng": 4.832, "type": "musicien"}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json(response).await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["type"], "musicien");
        assert!(created["timestamp"].is_string());

        let response = get(state).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json(response).await, Value::Array(vec![created]));
    }

    #[tokio::test]
    async fn invalid_reports_are_bad_requests() {
        let state = state(Arc::new(MemoryStore::new()));
        for body in [
            r#"{"lat": 45.7578, "lng": 4.832, "type": "   "}"#,
            r#"{"lat": "north", "lng": 4.832}"#,
            r#"{"lng": 4.832}"#,
            "[1, 2]",
            "not json",
        ] {
            let response = post(state.clone(), body).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
            assert!(json(response).await["error"].is_string(), "{body}");
        }
        assert!(state.store.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn storage_faults_are_internal_errors() {
        let state = state(Arc::new(Unwritable));

        let response = post(state.clone(), r#"{"lat": 45.7578, "lng": 4.832}"#).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json(response).await["error"], "Internal server error");

        let response = get(state.clone()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json(response).await["error"].is_string());

        let response = post(state, r#"{"lat": 45.7578, "lng": 4.832, "type": ""}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
