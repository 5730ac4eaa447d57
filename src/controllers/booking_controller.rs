//! Controller del ciclo de vida de reservas

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::booking_dto::{
    BookingConfirmedResponse, BookingSummaryResponse, CancellationResponse,
    ConfirmBookingRequest, CreateOrderRequest, OrderCreatedResponse, ReceiptResponse,
};
use crate::dto::ApiResponse;
use crate::models::booking::{BookingStatus, RefundStatus};
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::review_repository::ReviewRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::booking_service::BookingService;
use crate::services::pricing_service;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::format_booking_datetime;

pub struct BookingController {
    service: BookingService,
    bookings: BookingRepository,
    vehicles: VehicleRepository,
    users: UserRepository,
    reviews: ReviewRepository,
}

impl BookingController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: BookingService::new(state),
            bookings: BookingRepository::new(state.pool.clone()),
            vehicles: VehicleRepository::new(state.pool.clone()),
            users: UserRepository::new(state.pool.clone()),
            reviews: ReviewRepository::new(state.pool.clone()),
        }
    }

    /// Fase 1: quote + orden de pago
    pub async fn create_order(
        &self,
        user_id: Uuid,
        request: CreateOrderRequest,
    ) -> Result<ApiResponse<OrderCreatedResponse>, AppError> {
        request.validate()?;

        let response = self.service.create_order(user_id, request).await?;

        Ok(ApiResponse::success_with_message(
            response,
            "Razorpay order created successfully.".to_string(),
        ))
    }

    /// Fase 3: confirmación tras el pago externo
    pub async fn confirm_booking(
        &self,
        user_id: Uuid,
        request: ConfirmBookingRequest,
    ) -> Result<ApiResponse<BookingConfirmedResponse>, AppError> {
        let response = self.service.confirm_booking(user_id, request).await?;

        Ok(ApiResponse::success_with_message(
            response,
            "Booking confirmed and paid!".to_string(),
        ))
    }

    pub async fn cancel_booking(
        &self,
        user_id: Uuid,
        booking_id: Uuid,
    ) -> Result<ApiResponse<CancellationResponse>, AppError> {
        let (_booking, response) = self.service.cancel_booking(user_id, booking_id).await?;

        Ok(ApiResponse::success_with_message(
            response,
            "Booking cancelled successfully. Refund is pending.".to_string(),
        ))
    }

    /// Historial de reservas del cliente, con flag de review
    pub async fn my_bookings(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<BookingSummaryResponse>, AppError> {
        let bookings = self.bookings.find_by_user(user_id).await?;
        let reviewed: std::collections::HashSet<Uuid> = self
            .reviews
            .reviewed_booking_ids(user_id)
            .await?
            .into_iter()
            .collect();

        let now = Utc::now();

        let history = bookings
            .into_iter()
            .map(|b| {
                let reviewable = b.status == BookingStatus::Confirmed
                    && b.end_date <= now
                    && !reviewed.contains(&b.id);

                BookingSummaryResponse {
                    booking_id: b.id,
                    vehicle_name: b.vehicle_name,
                    vehicle_code: b.vehicle_code,
                    host_name: b.host_name,
                    start_date: format_booking_datetime(&b.start_date),
                    end_date: format_booking_datetime(&b.end_date),
                    total_price: b.total_price,
                    deposit_amount: b.deposit_amount,
                    status: b.status,
                    refund_status: b.refund_status,
                    deposit_refund_status: b.deposit_refund_status,
                    booked_at: format_booking_datetime(&b.booked_at),
                    reviewable,
                }
            })
            .collect();

        Ok(history)
    }

    /// Recibo detallado de una reserva del cliente.
    ///
    /// Las cifras mostradas se reconstruyen desde los totales
    /// persistidos; el total almacenado es el autoritativo.
    pub async fn receipt(
        &self,
        user_id: Uuid,
        booking_id: Uuid,
    ) -> Result<ReceiptResponse, AppError> {
        let booking = self
            .bookings
            .find_by_id_for_user(booking_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Booking receipt not found or unauthorized.".to_string())
            })?;

        let vehicle = self
            .vehicles
            .find_by_id(booking.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found.".to_string()))?;

        let host = self
            .users
            .find_by_id(vehicle.host_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Host not found.".to_string()))?;

        let total_hours = pricing_service::interval_hours(booking.start_date, booking.end_date);
        let billed_hours = if total_hours < 24.0 {
            total_hours.ceil()
        } else {
            total_hours
        };

        let gross = booking.total_price - booking.deposit_amount;
        let gst = (gross as f64 * 0.18).round() as i64;
        let subtotal_base = gross - gst;

        let is_cancellation_refund = booking.status == BookingStatus::Cancelled
            && booking.refund_status != RefundStatus::NotApplicable;

        Ok(ReceiptResponse {
            booking_id: booking.id,
            vehicle_name: vehicle.name,
            host_name: host.full_name(),
            start_date: format_booking_datetime(&booking.start_date),
            end_date: format_booking_datetime(&booking.end_date),
            billed_hours: (billed_hours * 10.0).round() / 10.0,
            subtotal_base,
            gst,
            deposit: booking.deposit_amount,
            final_price: booking.total_price,
            is_cancellation_refund,
        })
    }
}
