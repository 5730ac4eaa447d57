//! Repository de reservas
//!
//! Todas las consultas SQL de bookings viven aquí, incluida la
//! inserción transaccional de la confirmación: el lock del vehículo
//! serializa confirmaciones concurrentes sobre el mismo vehículo, de
//! modo que el re-chequeo de solapamiento y el INSERT son atómicos.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus};
use crate::utils::errors::AppError;

/// Reserva con los datos del vehículo y del host para listados
#[derive(Debug, sqlx::FromRow)]
pub struct BookingWithVehicle {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_price: i64,
    pub deposit_amount: i64,
    pub status: BookingStatus,
    pub payment_id: Option<String>,
    pub refund_status: crate::models::booking::RefundStatus,
    pub deposit_refund_status: crate::models::booking::DepositRefundStatus,
    pub booked_at: DateTime<Utc>,
    pub vehicle_name: String,
    pub vehicle_code: String,
    pub host_name: String,
}

/// Caso de reembolso pendiente para el panel de administración
#[derive(Debug, sqlx::FromRow)]
pub struct RefundCaseRow {
    pub booking_id: Uuid,
    pub customer_name: String,
    pub vehicle_name: String,
    pub host_name: String,
    pub total_price: i64,
    pub deposit_amount: i64,
    pub payment_id: Option<String>,
    pub booked_at: DateTime<Utc>,
}

/// Reserva confirmada con el tier del host para el resumen financiero
#[derive(Debug, sqlx::FromRow)]
pub struct HostFinancialRow {
    pub booking_id: Uuid,
    pub host_id: Uuid,
    pub host_name: String,
    pub commission_tier: i32,
    pub total_price: i64,
    pub deposit_amount: i64,
}

/// Reserva confirmada de un vehículo del host, con el cliente
#[derive(Debug, sqlx::FromRow)]
pub struct HostVehicleBookingRow {
    pub booking_id: Uuid,
    pub vehicle_id: Uuid,
    pub customer_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Intervalo confirmado de un vehículo (para el calendario del inventario)
#[derive(Debug, sqlx::FromRow)]
pub struct ConfirmedInterval {
    pub vehicle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Chequeo de solapamiento semiabierto: existe reserva confirmada
    /// con existing.start < end AND existing.end > start. Los extremos
    /// que se tocan no solapan.
    pub async fn has_overlap(
        &self,
        vehicle_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE vehicle_id = $1
                  AND status = 'confirmed'
                  AND start_date < $3
                  AND end_date > $2
            )
            "#,
        )
        .bind(vehicle_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Insertar la reserva confirmada dentro de una transacción.
    ///
    /// El SELECT ... FOR UPDATE sobre el vehículo bloquea a cualquier
    /// otra confirmación del mismo vehículo hasta el commit; de dos
    /// intentos concurrentes con intervalos solapados exactamente uno
    /// puede insertar.
    pub async fn create_confirmed(
        &self,
        user_id: Uuid,
        vehicle_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        total_price: i64,
        deposit_amount: i64,
        payment_id: &str,
    ) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await?;

        let vehicle_row: Option<(bool,)> =
            sqlx::query_as("SELECT is_available FROM vehicles WHERE id = $1 FOR UPDATE")
                .bind(vehicle_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((is_available,)) = vehicle_row else {
            return Err(AppError::NotFound("Vehicle not found.".to_string()));
        };

        if !is_available {
            return Err(AppError::Conflict(
                "Vehicle is no longer available. Refund will be processed shortly.".to_string(),
            ));
        }

        let overlap: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE vehicle_id = $1
                  AND status = 'confirmed'
                  AND start_date < $3
                  AND end_date > $2
            )
            "#,
        )
        .bind(vehicle_id)
        .bind(start)
        .bind(end)
        .fetch_one(&mut *tx)
        .await?;

        if overlap.0 {
            return Err(AppError::Conflict(
                "Vehicle was booked by another user during payment. Refund will be processed shortly."
                    .to_string(),
            ));
        }

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings
                (id, user_id, vehicle_id, start_date, end_date, total_price,
                 deposit_amount, status, payment_id, refund_status,
                 deposit_refund_status, booked_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'confirmed', $8, 'not_applicable', 'pending', $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(vehicle_id)
        .bind(start)
        .bind(end)
        .bind(total_price)
        .bind(deposit_amount)
        .bind(payment_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(booking)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    pub async fn find_by_id_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Booking>, AppError> {
        let booking =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(booking)
    }

    /// Reservas del cliente con datos del vehículo, más recientes primero
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<BookingWithVehicle>, AppError> {
        let bookings = sqlx::query_as::<_, BookingWithVehicle>(
            r#"
            SELECT b.*, v.name AS vehicle_name, v.vehicle_code,
                   u.first_name AS host_name
            FROM bookings b
            JOIN vehicles v ON v.id = b.vehicle_id
            JOIN users u ON u.id = v.host_id
            WHERE b.user_id = $1
            ORDER BY b.start_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Reservas confirmadas de los vehículos de un host
    pub async fn confirmed_by_host(
        &self,
        host_id: Uuid,
    ) -> Result<Vec<BookingWithVehicle>, AppError> {
        let bookings = sqlx::query_as::<_, BookingWithVehicle>(
            r#"
            SELECT b.*, v.name AS vehicle_name, v.vehicle_code,
                   u.first_name AS host_name
            FROM bookings b
            JOIN vehicles v ON v.id = b.vehicle_id
            JOIN users u ON u.id = v.host_id
            WHERE v.host_id = $1 AND b.status = 'confirmed'
            ORDER BY b.start_date DESC
            "#,
        )
        .bind(host_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Marcar la cancelación: la reserva pasa a cancelled, el reembolso
    /// queda pendiente de revisión del admin y el depósito se pliega en
    /// esa única decisión de reembolso.
    pub async fn mark_cancelled(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = 'cancelled',
                refund_status = 'pending',
                deposit_refund_status = 'not_applicable'
            WHERE id = $1 AND status = 'confirmed'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::InvalidState(
                "Booking is not in a cancellable state.".to_string(),
            ));
        }

        Ok(())
    }

    /// Marcar el reembolso de cancelación como procesado (una sola vez)
    pub async fn mark_refund_processed(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET refund_status = 'processed'
            WHERE id = $1 AND status = 'cancelled' AND refund_status <> 'processed'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::InvalidState(
                "Refund already processed or status is not Cancelled.".to_string(),
            ));
        }

        Ok(())
    }

    /// Marcar el reembolso del depósito como procesado (una sola vez)
    pub async fn mark_deposit_refund_processed(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET deposit_refund_status = 'processed'
            WHERE id = $1 AND deposit_refund_status = 'pending'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::InvalidState(
                "Deposit refund already processed or denied.".to_string(),
            ));
        }

        Ok(())
    }

    /// Cancelaciones con reembolso pendiente de revisión
    pub async fn pending_cancellation_refunds(&self) -> Result<Vec<RefundCaseRow>, AppError> {
        let rows = sqlx::query_as::<_, RefundCaseRow>(
            r#"
            SELECT b.id AS booking_id,
                   c.first_name || ' ' || c.last_name AS customer_name,
                   v.name AS vehicle_name,
                   h.first_name AS host_name,
                   b.total_price, b.deposit_amount, b.payment_id, b.booked_at
            FROM bookings b
            JOIN users c ON c.id = b.user_id
            JOIN vehicles v ON v.id = b.vehicle_id
            JOIN users h ON h.id = v.host_id
            WHERE b.status = 'cancelled' AND b.refund_status = 'pending'
            ORDER BY b.booked_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Reservas confirmadas ya terminadas con depósito pendiente de devolver
    pub async fn pending_deposit_refunds(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<RefundCaseRow>, AppError> {
        let rows = sqlx::query_as::<_, RefundCaseRow>(
            r#"
            SELECT b.id AS booking_id,
                   c.first_name || ' ' || c.last_name AS customer_name,
                   v.name AS vehicle_name,
                   h.first_name AS host_name,
                   b.total_price, b.deposit_amount, b.payment_id, b.booked_at
            FROM bookings b
            JOIN users c ON c.id = b.user_id
            JOIN vehicles v ON v.id = b.vehicle_id
            JOIN users h ON h.id = v.host_id
            WHERE b.status = 'confirmed'
              AND b.end_date < $1
              AND b.deposit_refund_status = 'pending'
            ORDER BY b.end_date ASC
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Reservas confirmadas con el tier de su host (resumen financiero)
    pub async fn confirmed_with_host_tier(&self) -> Result<Vec<HostFinancialRow>, AppError> {
        let rows = sqlx::query_as::<_, HostFinancialRow>(
            r#"
            SELECT b.id AS booking_id,
                   h.id AS host_id,
                   h.first_name AS host_name,
                   h.commission_tier,
                   b.total_price, b.deposit_amount
            FROM bookings b
            JOIN vehicles v ON v.id = b.vehicle_id
            JOIN users h ON h.id = v.host_id
            WHERE b.status = 'confirmed'
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Todos los intervalos confirmados (calendario del inventario)
    pub async fn all_confirmed_intervals(&self) -> Result<Vec<ConfirmedInterval>, AppError> {
        let rows = sqlx::query_as::<_, ConfirmedInterval>(
            "SELECT vehicle_id, start_date, end_date FROM bookings WHERE status = 'confirmed'",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Reservas confirmadas de todos los vehículos de un host, con el
    /// nombre del cliente (dashboard del host)
    pub async fn confirmed_for_host_vehicles(
        &self,
        host_id: Uuid,
    ) -> Result<Vec<HostVehicleBookingRow>, AppError> {
        let rows = sqlx::query_as::<_, HostVehicleBookingRow>(
            r#"
            SELECT b.id AS booking_id,
                   b.vehicle_id,
                   c.first_name || ' ' || c.last_name AS customer_name,
                   b.start_date, b.end_date
            FROM bookings b
            JOIN vehicles v ON v.id = b.vehicle_id
            JOIN users c ON c.id = b.user_id
            WHERE v.host_id = $1 AND b.status = 'confirmed'
            ORDER BY b.start_date DESC
            "#,
        )
        .bind(host_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// ¿Tiene el vehículo una reserva confirmada que aún no termina?
    pub async fn has_future_confirmed(
        &self,
        vehicle_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE vehicle_id = $1 AND status = 'confirmed' AND end_date > $2
            )
            "#,
        )
        .bind(vehicle_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn total_count(&self) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;
        Ok(result.0)
    }
}
