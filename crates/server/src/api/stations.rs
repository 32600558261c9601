use crate::{
    api::ApiError,
    dto::{CategoryDto, DirectionDto, StationDto},
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use std::{collections::HashMap, str::FromStr, sync::Arc};
use vigie::{
    reports::Category,
    shared::{Coordinate, Distance},
};

pub async fn near(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let latitude: f64 = required(&params, "lat")?;
    let longitude: f64 = required(&params, "lng")?;
    let radius = match optional::<f64>(&params, "radius")? {
        Some(meters) => Distance::from_meters(meters),
        None => state.radius,
    };
    let coordinate = Coordinate {
        latitude,
        longitude,
    };
    let result: Vec<_> = state
        .network
        .stations_within(&coordinate, radius)
        .iter()
        .map(StationDto::from_match)
        .collect();
    Ok(Json(result).into_response())
}

pub async fn search(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let query: String = required(&params, "q")?;
    let count = optional::<usize>(&params, "count")?.unwrap_or(5);
    let result: Vec<_> = state
        .network
        .search_stations(&query)
        .into_iter()
        .take(count)
        .map(StationDto::from)
        .collect();
    Ok(Json(result).into_response())
}

pub async fn directions(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let name: String = required(&params, "name")?;
    let result: Vec<_> = state
        .network
        .directions(&name)
        .iter()
        .map(DirectionDto::from)
        .collect();
    Ok(Json(result).into_response())
}

pub async fn categories() -> Response {
    let result: Vec<_> = Category::CHOICES
        .into_iter()
        .map(CategoryDto::from)
        .collect();
    Json(result).into_response()
}

fn required<T: FromStr>(params: &HashMap<String, String>, key: &str) -> Result<T, ApiError> {
    optional(params, key)?.ok_or_else(|| ApiError::bad_request(format!("Missing parameter {key}")))
}

fn optional<T: FromStr>(
    params: &HashMap<String, String>,
    key: &str,
) -> Result<Option<T>, ApiError> {
    params
        .get(key)
        .map(|value| {
            value
                .parse()
                .map_err(|_| ApiError::bad_request(format!("Invalid parameter {key}")))
        })
        .transpose()
}
