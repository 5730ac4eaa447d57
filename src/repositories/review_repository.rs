//! Repository de reviews
//!
//! El alta de una review y el recálculo del rating del vehículo van en
//! la misma transacción.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::review::{average_rating, Review};
use crate::utils::errors::AppError;

pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn exists_for_booking(&self, booking_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM reviews WHERE booking_id = $1)")
                .bind(booking_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    /// Ids de reservas de un usuario que ya tienen review
    pub async fn reviewed_booking_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let rows: Vec<(Uuid,)> =
            sqlx::query_as("SELECT booking_id FROM reviews WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Insertar la review y dejar actualizado el rating promedio del
    /// vehículo (1 decimal). Devuelve la review y el nuevo rating.
    pub async fn create_and_rate(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
        vehicle_id: Uuid,
        rating: f64,
        comment: Option<String>,
    ) -> Result<(Review, f64), AppError> {
        let mut tx = self.pool.begin().await?;

        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (id, booking_id, user_id, vehicle_id, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(booking_id)
        .bind(user_id)
        .bind(vehicle_id)
        .bind(rating)
        .bind(comment)
        .bind(chrono::Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let ratings: Vec<(f64,)> =
            sqlx::query_as("SELECT rating FROM reviews WHERE vehicle_id = $1")
                .bind(vehicle_id)
                .fetch_all(&mut *tx)
                .await?;

        let values: Vec<f64> = ratings.into_iter().map(|r| r.0).collect();
        let new_rating = average_rating(&values);

        sqlx::query("UPDATE vehicles SET rating = $2 WHERE id = $1")
            .bind(vehicle_id)
            .bind(new_rating)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((review, new_rating))
    }
}
