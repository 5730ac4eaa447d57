//! Rutas de reviews

use axum::{extract::State, routing::post, Extension, Json, Router};

use crate::controllers::review_controller::ReviewController;
use crate::dto::review_dto::{ReviewResponse, SubmitReviewRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_review_router() -> Router<AppState> {
    Router::new().route("/", post(submit_review))
}

async fn submit_review(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<SubmitReviewRequest>,
) -> Result<Json<ApiResponse<ReviewResponse>>, AppError> {
    let controller = ReviewController::new(&state);
    let response = controller.submit(user.user_id, request).await?;
    Ok(Json(response))
}
