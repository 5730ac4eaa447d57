//! Rutas del panel de host

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::host_controller::HostController;
use crate::dto::host_dto::{EarningsResponse, SetTierRequest, TierResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_host_router() -> Router<AppState> {
    Router::new()
        .route("/tier", post(set_tier))
        .route("/earnings", get(earnings))
}

async fn set_tier(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<SetTierRequest>,
) -> Result<Json<ApiResponse<TierResponse>>, AppError> {
    let controller = HostController::new(&state);
    let response = controller.set_tier(user.user_id, request).await?;
    Ok(Json(response))
}

async fn earnings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<EarningsResponse>, AppError> {
    let controller = HostController::new(&state);
    let response = controller.earnings(user.user_id).await?;
    Ok(Json(response))
}
