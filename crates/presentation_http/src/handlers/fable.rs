//! Fable generation handler

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use domain::FableRequest;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{error::ApiError, state::AppState};

/// Fable request body
///
/// Every field is optional at the wire level so that absent and blank fields
/// are reported together.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateFableBody {
    pub character1: Option<String>,
    pub character2: Option<String>,
    pub setting: Option<String>,
    pub moral: Option<String>,
    pub style_mode: Option<String>,
}

impl TryFrom<GenerateFableBody> for FableRequest {
    type Error = ApiError;

    fn try_from(body: GenerateFableBody) -> Result<Self, Self::Error> {
        Ok(Self::from_optional(
            body.character1,
            body.character2,
            body.setting,
            body.moral,
            body.style_mode,
        )?)
    }
}

/// Fable response body
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateFableResponse {
    /// Fable text
    pub fable: String,
    /// Whether the fable was served from the cache
    pub cached: bool,
    /// Present when the cache could not be used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Generate a fable, serving it from the cache when possible
///
/// Only an unreadable or incomplete body fails; every backend problem
/// degrades to a fallback fable.
#[instrument(skip(state, body))]
pub async fn generate_fable(
    State(state): State<AppState>,
    body: Result<Json<GenerateFableBody>, JsonRejection>,
) -> Result<Json<GenerateFableResponse>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        debug!(error = %rejection, "Rejected fable request body");
        ApiError::BadRequest(rejection.body_text())
    })?;

    let request = FableRequest::try_from(body)?;
    let generated = state.fable_service.generate(&request).await;

    Ok(Json(GenerateFableResponse {
        fable: generated.fable,
        cached: generated.cached,
        warning: generated.warning,
    }))
}
