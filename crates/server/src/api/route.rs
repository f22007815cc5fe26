use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use transitmap::route::RouteParameters;

use crate::{dto::RouteDto, state::AppState};

pub async fn route(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let from = required_id(&params, "from")?;
    let to = required_id(&params, "to")?;
    let transports = match params.get("transports") {
        Some(value) => parse_ids(value)?,
        None => state.model.all_transports(),
    };
    let mut parameters = RouteParameters::new(from, to, transports);
    if let Some(value) = params.get("delay") {
        let profile = value.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
        parameters = parameters.with_delay_profile(profile);
    }

    let route = state
        .model
        .find_route(&parameters)
        .map_err(|_| StatusCode::BAD_REQUEST)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(RouteDto::from(&route, &state.model)).into_response())
}

fn required_id(params: &HashMap<String, String>, key: &str) -> Result<u32, StatusCode> {
    params
        .get(key)
        .ok_or(StatusCode::BAD_REQUEST)?
        .parse()
        .map_err(|_| StatusCode::BAD_REQUEST)
}

fn parse_ids(value: &str) -> Result<Vec<u32>, StatusCode> {
    value
        .split(',')
        .filter(|id| !id.trim().is_empty())
        .map(|id| id.trim().parse().map_err(|_| StatusCode::BAD_REQUEST))
        .collect()
}
