use axum::{extract::State, Extension, Json};

use creatorlens_providers::ProviderStatus;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

/// `GET /api/v1/providers`
///
/// Configuration snapshot for every adapter, available or not. Performs no
/// network calls.
pub(super) async fn list_providers(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<ProviderStatus>>> {
    Json(ApiResponse {
        data: state.manager.providers_status(),
        meta: ResponseMeta::new(req_id.0),
    })
}
