//! DTOs de reviews

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request para enviar una review de una reserva completada
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitReviewRequest {
    pub booking_id: Uuid,

    #[validate(range(min = 1.0, max = 5.0))]
    pub rating: f64,

    pub comment: Option<String>,
}

/// Response con la review creada y el rating recalculado
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub review_id: Uuid,
    pub vehicle_id: Uuid,
    pub vehicle_rating: f64,
}
