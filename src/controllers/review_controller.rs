//! Controller de reviews

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::review_dto::{ReviewResponse, SubmitReviewRequest};
use crate::dto::ApiResponse;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::review_repository::ReviewRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct ReviewController {
    bookings: BookingRepository,
    reviews: ReviewRepository,
}

impl ReviewController {
    pub fn new(state: &AppState) -> Self {
        Self {
            bookings: BookingRepository::new(state.pool.clone()),
            reviews: ReviewRepository::new(state.pool.clone()),
        }
    }

    /// Enviar una review de una reserva completada del propio usuario.
    /// El alta deja el rating promedio del vehículo recalculado.
    pub async fn submit(
        &self,
        user_id: Uuid,
        request: SubmitReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, AppError> {
        request.validate()?;

        let booking = self
            .bookings
            .find_by_id_for_user(request.booking_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::Forbidden("Booking not found or not eligible for review.".to_string())
            })?;

        let has_review = self.reviews.exists_for_booking(booking.id).await?;

        if !booking.is_reviewable(Utc::now(), has_review) {
            return Err(AppError::Forbidden(
                "Booking not found or not eligible for review.".to_string(),
            ));
        }

        let (review, vehicle_rating) = self
            .reviews
            .create_and_rate(
                booking.id,
                user_id,
                booking.vehicle_id,
                request.rating,
                request.comment,
            )
            .await?;

        log::info!(
            "⭐ Review {} creada para vehículo {} (rating nuevo: {})",
            review.id,
            booking.vehicle_id,
            vehicle_rating
        );

        Ok(ApiResponse::success_with_message(
            ReviewResponse {
                review_id: review.id,
                vehicle_id: booking.vehicle_id,
                vehicle_rating,
            },
            "Review submitted successfully.".to_string(),
        ))
    }
}
