use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{dto::ModelDto, state::AppState};

pub async fn model(State(state): State<Arc<AppState>>) -> Json<ModelDto> {
    Json(ModelDto::from(&state.model))
}
