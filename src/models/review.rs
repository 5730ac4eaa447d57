//! Modelo de Review
//!
//! Una review por reserva completada. Al crearse recalcula el rating
//! promedio del vehículo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Review principal - mapea exactamente a la tabla reviews
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub rating: f64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Rating promedio de un conjunto de reviews, redondeado a 1 decimal.
/// Con el conjunto vacío se mantiene el rating semilla de 4.0.
pub fn average_rating(ratings: &[f64]) -> f64 {
    if ratings.is_empty() {
        return 4.0;
    }
    let sum: f64 = ratings.iter().sum();
    let avg = sum / ratings.len() as f64;
    (avg * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_review_sets_rating_to_submitted_value() {
        assert_eq!(average_rating(&[5.0]), 5.0);
        assert_eq!(average_rating(&[3.0]), 3.0);
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        assert_eq!(average_rating(&[5.0, 4.0]), 4.5);
        assert_eq!(average_rating(&[5.0, 4.0, 4.0]), 4.3);
        assert_eq!(average_rating(&[2.0, 3.0, 3.0]), 2.7);
    }

    #[test]
    fn test_empty_set_keeps_seed_rating() {
        assert_eq!(average_rating(&[]), 4.0);
    }
}
