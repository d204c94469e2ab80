//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Static greeting served on `/`
pub const WELCOME_MESSAGE: &str =
    "Welcome to the AI Crop Recommendation API. Use the /recommend_crop endpoint to get a recommendation.";

#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: ModelStatus,
}

#[derive(Serialize)]
pub struct ModelStatus {
    pub loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trees: Option<usize>,
}

/// Root endpoint
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE,
    })
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model = match &state.model_info {
        Some(info) => ModelStatus {
            loaded: true,
            fingerprint: Some(info.fingerprint.clone()),
            trees: Some(info.trees),
        },
        None => ModelStatus {
            loaded: state.recommendations.is_model_loaded(),
            fingerprint: None,
            trees: None,
        },
    };

    // A service without a model still answers, but cannot recommend
    let status = if model.loaded { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model,
    })
}
