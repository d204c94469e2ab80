//! HTTP handler for crop recommendations

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use shared::{RecommendationRequest, RecommendationResponse};
use tracing::Instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;
use crate::AppState;

/// Recommend a crop for a farm
pub async fn recommend_crop(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(request) = payload?;
    request.validate()?;

    let span = tracing::info_span!(
        "recommend_crop",
        request_id = %Uuid::new_v4(),
        state = %request.state,
        district = %request.district,
    );

    let response = state
        .recommendations
        .recommend(&request)
        .instrument(span)
        .await?;
    Ok(Json(response))
}
