use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{dto::StationDto, state::AppState};

pub async fn stations(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let query = params.get("q").map(String::as_str).unwrap_or_default();
    let count: usize = match params.get("count") {
        Some(value) => value.parse().map_err(|_| StatusCode::BAD_REQUEST)?,
        None => 20,
    };
    let result: Vec<_> = state
        .model
        .search_stations_by_name(query)
        .take(count)
        .map(|station| StationDto::from(station, &state.model))
        .collect();
    Ok(Json(result).into_response())
}
