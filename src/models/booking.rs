//! Modelo de Booking
//!
//! La reserva es la entidad central del marketplace. Este módulo define
//! sus estados, las transiciones permitidas y la política de cancelación.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la reserva - mapea al ENUM booking_status
///
/// Las transiciones son monótonas: confirmed -> cancelled | completed.
/// Cancelled y completed son terminales.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }
}

/// Estado del reembolso de cancelación - mapea al ENUM refund_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "refund_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    NotApplicable,
    Pending,
    Processed,
    Denied,
}

/// Estado del reembolso del depósito - mapea al ENUM deposit_refund_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "deposit_refund_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DepositRefundStatus {
    Pending,
    Processed,
    Denied,
    NotApplicable,
}

/// Booking principal - mapea exactamente a la tabla bookings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_price: i64,
    pub deposit_amount: i64,
    pub status: BookingStatus,
    pub payment_id: Option<String>,
    pub refund_status: RefundStatus,
    pub deposit_refund_status: DepositRefundStatus,
    pub booked_at: DateTime<Utc>,
}

/// Desglose de una cancelación: fee retenido y monto a devolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancellationBreakdown {
    pub fee: i64,
    pub refund_amount: i64,
}

/// Política de cancelación: dentro de la primera hora desde la reserva
/// el reembolso es total; después se retiene el 10% redondeado.
pub fn cancellation_breakdown_for(
    total_price: i64,
    booked_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> CancellationBreakdown {
    if now - booked_at < Duration::hours(1) {
        CancellationBreakdown {
            fee: 0,
            refund_amount: total_price,
        }
    } else {
        let fee = (total_price as f64 * 0.10).round() as i64;
        CancellationBreakdown {
            fee,
            refund_amount: total_price - fee,
        }
    }
}

impl Booking {
    /// Solo una reserva confirmada puede cancelarse
    pub fn can_cancel(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    pub fn cancellation_breakdown(&self, now: DateTime<Utc>) -> CancellationBreakdown {
        cancellation_breakdown_for(self.total_price, self.booked_at, now)
    }

    /// Una reserva admite review si está confirmada, ya terminó
    /// y todavía no tiene review.
    pub fn is_reviewable(&self, now: DateTime<Utc>, has_review: bool) -> bool {
        self.status == BookingStatus::Confirmed && self.end_date <= now && !has_review
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking_with(total_price: i64, booked_at: DateTime<Utc>) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            start_date: booked_at + Duration::hours(24),
            end_date: booked_at + Duration::hours(48),
            total_price,
            deposit_amount: 500,
            status: BookingStatus::Confirmed,
            payment_id: Some("pay_test123".to_string()),
            refund_status: RefundStatus::NotApplicable,
            deposit_refund_status: DepositRefundStatus::Pending,
            booked_at,
        }
    }

    #[test]
    fn test_cancellation_within_first_hour_is_free() {
        let booked_at = Utc::now();
        let booking = booking_with(1000, booked_at);

        let breakdown = booking.cancellation_breakdown(booked_at + Duration::minutes(30));
        assert_eq!(breakdown.fee, 0);
        assert_eq!(breakdown.refund_amount, 1000);
    }

    #[test]
    fn test_cancellation_after_one_hour_retains_ten_percent() {
        let booked_at = Utc::now();
        let booking = booking_with(1000, booked_at);

        let breakdown = booking.cancellation_breakdown(booked_at + Duration::hours(2));
        assert_eq!(breakdown.fee, 100);
        assert_eq!(breakdown.refund_amount, 900);
    }

    #[test]
    fn test_cancellation_fee_rounds_to_integer() {
        let booked_at = Utc::now();
        let booking = booking_with(855, booked_at);

        let breakdown = booking.cancellation_breakdown(booked_at + Duration::hours(3));
        // 10% de 855 = 85.5 -> 86
        assert_eq!(breakdown.fee, 86);
        assert_eq!(breakdown.refund_amount, 769);
    }

    #[test]
    fn test_only_confirmed_bookings_can_cancel() {
        let mut booking = booking_with(1000, Utc::now());
        assert!(booking.can_cancel());

        booking.status = BookingStatus::Cancelled;
        assert!(!booking.can_cancel());

        booking.status = BookingStatus::Completed;
        assert!(!booking.can_cancel());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!BookingStatus::Confirmed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::Completed.is_terminal());
    }

    #[test]
    fn test_reviewable_requires_finished_confirmed_and_unreviewed() {
        let booked_at = Utc::now() - Duration::hours(72);
        let booking = booking_with(1000, booked_at);
        let after_end = booking.end_date + Duration::hours(1);
        let before_end = booking.end_date - Duration::hours(1);

        assert!(booking.is_reviewable(after_end, false));
        assert!(!booking.is_reviewable(before_end, false));
        assert!(!booking.is_reviewable(after_end, true));

        let mut cancelled = booking.clone();
        cancelled.status = BookingStatus::Cancelled;
        assert!(!cancelled.is_reviewable(after_end, false));
    }
}
