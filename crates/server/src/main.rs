mod api;
mod dto;
mod state;

use crate::state::AppState;
use axum::routing::get;
use std::{env, path::Path, sync::Arc, time::Instant};
use tracing::{error, info};
use transitmap::{
    model::{Model, References},
    pmz::Config,
};

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let args: Vec<_> = env::args().collect();
    if args.len() < 2 {
        error!("Missing pmz archive");
        std::process::exit(1);
    }
    let port = env::var("PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    info!("Loading data...");
    let now = Instant::now();
    let model = match Model::from_pmz_path(Path::new(&args[1]), Config::default(), References::none())
    {
        Ok(model) => model,
        Err(err) => {
            error!("Failed to import {}: {err}", args[1]);
            std::process::exit(1);
        }
    };
    info!(
        "Loaded {} with {} stations in {:?}",
        model.system_name,
        model.stations.len(),
        now.elapsed()
    );
    let state = Arc::new(AppState::new(model));

    let app = axum::Router::new()
        .route("/model", get(api::model))
        .route("/stations", get(api::stations))
        .route("/route", get(api::route))
        .with_state(state);
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {port}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening to port {port}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
    }
}
