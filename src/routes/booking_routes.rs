//! Rutas del flujo de reservas

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::booking_controller::BookingController;
use crate::dto::booking_dto::{
    BookingConfirmedResponse, BookingSummaryResponse, CancellationResponse,
    ConfirmBookingRequest, CreateOrderRequest, OrderCreatedResponse, ReceiptResponse,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/order", post(create_order))
        .route("/confirm", post(confirm_booking))
        .route("/mine", get(my_bookings))
        .route("/:id/cancel", post(cancel_booking))
        .route("/:id/receipt", get(receipt))
}

async fn create_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<ApiResponse<OrderCreatedResponse>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.create_order(user.user_id, request).await?;
    Ok(Json(response))
}

async fn confirm_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<ConfirmBookingRequest>,
) -> Result<Json<ApiResponse<BookingConfirmedResponse>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.confirm_booking(user.user_id, request).await?;
    Ok(Json(response))
}

async fn my_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<BookingSummaryResponse>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.my_bookings(user.user_id).await?;
    Ok(Json(response))
}

async fn cancel_booking(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CancellationResponse>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.cancel_booking(user.user_id, id).await?;
    Ok(Json(response))
}

async fn receipt(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReceiptResponse>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.receipt(user.user_id, id).await?;
    Ok(Json(response))
}
