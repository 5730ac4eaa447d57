//! Rutas de vehículos: gestión del host e inventario público

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, HostVehicleResponse, InventoryVehicleResponse, UpdateVehicleRequest,
    VehicleResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Router de gestión de vehículos (solo hosts aprobados)
pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/:id", put(update_vehicle))
        .route("/:id/toggle", post(toggle_availability))
}

/// Router público del inventario
pub fn create_inventory_router() -> Router<AppState> {
    Router::new().route("/inventory", get(inventory))
}

async fn inventory(
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryVehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.inventory().await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.create(user.user_id, request).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<HostVehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.list_for_host(user.user_id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.update(user.user_id, id, request).await?;
    Ok(Json(response))
}

async fn toggle_availability(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.toggle_availability(user.user_id, id).await?;
    Ok(Json(response))
}
