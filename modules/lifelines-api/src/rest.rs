use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lifelines_common::{LifelinesError, NarrativeResult};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct StoryRequest {
    pub name1: String,
    pub name2: String,
}

/// Error body: `{"detail": "..."}`, the shape the front end already reads.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl From<LifelinesError> for ApiError {
    fn from(err: LifelinesError) -> Self {
        match err {
            LifelinesError::InvalidInput(detail) => Self {
                status: StatusCode::BAD_REQUEST,
                detail,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "LifeLines API is running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": "lifelines-api" }))
}

pub async fn predict_story(
    State(state): State<AppState>,
    Json(body): Json<StoryRequest>,
) -> Result<Json<NarrativeResult>, ApiError> {
    let result = state.resolver.resolve(&body.name1, &body.name2).await?;
    info!(
        is_special = result.is_special,
        theme = %result.theme,
        events = result.timeline.len(),
        "Story resolved"
    );
    Ok(Json(result))
}
