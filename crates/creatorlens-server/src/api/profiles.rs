use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use creatorlens_core::{validate_username, Platform, StandardizedProfile};

use crate::middleware::RequestId;

use super::{map_provider_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct FetchProfileQuery {
    /// Adapter to try first; unknown names fall back to the default order.
    provider: Option<String>,
}

/// `GET /api/v1/profiles/{platform}/{username}`
///
/// Validates the platform and handle here, then hands off to the provider
/// manager; the manager does not re-validate.
pub(super) async fn fetch_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((platform, username)): Path<(String, String)>,
    Query(query): Query<FetchProfileQuery>,
) -> Result<Json<ApiResponse<StandardizedProfile>>, ApiError> {
    let platform: Platform = platform.parse().map_err(|e| {
        ApiError::new(req_id.0.clone(), "validation_error", format!("{e}"))
    })?;

    let username = validate_username(&username)
        .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", format!("{e}")))?;

    let profile = state
        .manager
        .fetch_profile(username, platform, query.provider.as_deref())
        .await
        .map_err(|e| map_provider_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: profile,
        meta: ResponseMeta::new(req_id.0),
    }))
}
