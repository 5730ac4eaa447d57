//! Rutas del panel de administración

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::admin_controller::AdminController;
use crate::dto::admin_dto::{
    AdminDashboardResponse, ApproveHostResponse, ToggleHostStatusResponse,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/booking/:id/refund", post(process_refund))
        .route("/booking/:id/deposit-refund", post(process_deposit_refund))
        .route("/host/:id/approve", post(approve_host))
        .route("/host/:id/toggle-status", post(toggle_host_status))
}

async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<AdminDashboardResponse>, AppError> {
    let controller = AdminController::new(&state);
    let response = controller.dashboard().await?;
    Ok(Json(response))
}

async fn process_refund(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AdminController::new(&state);
    let response = controller.process_refund(id).await?;
    Ok(Json(response))
}

async fn process_deposit_refund(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = AdminController::new(&state);
    let response = controller.process_deposit_refund(id).await?;
    Ok(Json(response))
}

async fn approve_host(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ApproveHostResponse>>, AppError> {
    let controller = AdminController::new(&state);
    let response = controller.approve_host(id).await?;
    Ok(Json(response))
}

async fn toggle_host_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ToggleHostStatusResponse>>, AppError> {
    let controller = AdminController::new(&state);
    let response = controller.toggle_host_status(id).await?;
    Ok(Json(response))
}
