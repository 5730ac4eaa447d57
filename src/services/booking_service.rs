//! Flujo de reserva y orquestación del pago
//!
//! Máquina de tres fases por intento de reserva: quote (orden de pago),
//! captura externa en la pasarela (sin participación del servidor) y
//! confirmación con re-verificación server-side. La reserva solo se
//! persiste al final de la confirmación; cualquier gate fallido antes
//! del INSERT deja la base intacta.

use chrono::Utc;
use uuid::Uuid;

use crate::cache::{PendingQuote, QuoteCache};
use crate::dto::booking_dto::{
    BookingConfirmedResponse, CancellationResponse, ConfirmBookingRequest, CreateOrderRequest,
    OrderCreatedResponse,
};
use crate::dto::payment_dto::RazorpayPayment;
use crate::models::booking::Booking;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::pricing_service;
use crate::services::razorpay_service::RazorpayClient;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, reconciliation_error, AppError};
use crate::utils::validation::parse_booking_interval;

pub struct BookingService {
    bookings: BookingRepository,
    vehicles: VehicleRepository,
    users: UserRepository,
    razorpay: RazorpayClient,
    quotes: QuoteCache,
}

impl BookingService {
    pub fn new(state: &AppState) -> Self {
        Self {
            bookings: BookingRepository::new(state.pool.clone()),
            vehicles: VehicleRepository::new(state.pool.clone()),
            users: UserRepository::new(state.pool.clone()),
            razorpay: state.razorpay.clone(),
            quotes: state.quote_cache(),
        }
    }

    /// Chequeo de disponibilidad sobre strings del wire.
    /// Un intervalo que no parsea nunca está disponible.
    pub async fn is_available(
        &self,
        vehicle_id: Uuid,
        start: &str,
        end: &str,
    ) -> Result<bool, AppError> {
        let Ok((start_dt, end_dt)) = parse_booking_interval(start, end) else {
            return Ok(false);
        };

        let overlaps = self.bookings.has_overlap(vehicle_id, start_dt, end_dt).await?;
        Ok(!overlaps)
    }

    /// Fase 1: quote + orden de pago en la pasarela.
    ///
    /// Calcula el precio server-side, crea la orden por el total en
    /// paise y guarda el quote pendiente del usuario (reemplazando el
    /// anterior). Nada de esto toca la tabla de reservas.
    pub async fn create_order(
        &self,
        user_id: Uuid,
        request: CreateOrderRequest,
    ) -> Result<OrderCreatedResponse, AppError> {
        let (start, end) = parse_booking_interval(&request.start_date, &request.end_date)
            .map_err(|_| bad_request_error("Missing or invalid booking details."))?;

        let vehicle = self
            .vehicles
            .find_by_code(&request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found.".to_string()))?;

        // Un vehículo con el flag apagado no puede entrar en una reserva
        if !vehicle.is_available {
            return Err(AppError::Conflict(
                "Vehicle is not available for booking.".to_string(),
            ));
        }

        if !self
            .is_available(vehicle.id, &request.start_date, &request.end_date)
            .await?
        {
            return Err(AppError::Conflict(
                "Vehicle is booked for these times.".to_string(),
            ));
        }

        let quote = pricing_service::quote_breakdown(
            vehicle.base_price_per_hour(),
            &vehicle.fuel_type,
            start,
            end,
        );

        let amount_paise = quote.total * 100;
        let receipt = format!("rcpt_prime_drew_{}_{}", user_id.simple(), Uuid::new_v4().simple());

        let order = self
            .razorpay
            .create_order(amount_paise, &receipt)
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to create payment order: {}", e)))?;

        let pending = PendingQuote {
            vehicle_id: vehicle.id,
            vehicle_code: vehicle.vehicle_code.clone(),
            razorpay_order_id: order.id.clone(),
            start_date: request.start_date.clone(),
            end_date: request.end_date.clone(),
            expected_total: quote.total,
            expected_deposit: quote.deposit,
        };

        self.quotes
            .put(user_id, &pending)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store pending quote: {}", e)))?;

        let customer = self.users.find_by_id(user_id).await?;

        log::info!(
            "📝 Quote creado para usuario {}: vehículo {} total {} (orden {})",
            user_id,
            vehicle.vehicle_code,
            quote.total,
            order.id
        );

        Ok(OrderCreatedResponse {
            order_id: order.id,
            amount: amount_paise,
            currency: order.currency,
            key_id: self.razorpay.key_id().to_string(),
            name: customer.as_ref().map(|u| u.full_name()).unwrap_or_else(|| "Rider".to_string()),
            email: customer.as_ref().map(|u| u.email.clone()).unwrap_or_default(),
            contact: customer.as_ref().map(|u| u.phone.clone()).unwrap_or_default(),
        })
    }

    /// Fase 3: confirmación con re-verificación completa.
    ///
    /// Cada paso es un gate duro; el quote ya fue consumido al entrar,
    /// así que un segundo intento de confirmación falla con sesión
    /// expirada en lugar de duplicar la reserva.
    pub async fn confirm_booking(
        &self,
        user_id: Uuid,
        request: ConfirmBookingRequest,
    ) -> Result<BookingConfirmedResponse, AppError> {
        // (a) recuperar y consumir el quote de esta sesión
        let quote = self
            .quotes
            .take(user_id)
            .await
            .map_err(|e| AppError::Internal(format!("Quote store failure: {}", e)))?
            .ok_or_else(|| {
                AppError::BadRequest("Session expired or order was not initialized.".to_string())
            })?;

        if request.payment_id.trim().is_empty() || request.razorpay_order_id.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Payment verification data missing.".to_string(),
            ));
        }

        // (b) consultar el pago en la pasarela
        let payment = self
            .razorpay
            .fetch_payment(&request.payment_id)
            .await
            .map_err(|_| {
                reconciliation_error(
                    "Payment verification failed. Please contact support.",
                    Some(&request.payment_id),
                )
            })?;

        // (c) reconciliar orden, monto y estado de captura
        verify_payment_against_quote(&payment, &quote, &request.razorpay_order_id)?;

        let vehicle = self
            .vehicles
            .find_by_id(quote.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found.".to_string()))?;

        let (start, end) = parse_booking_interval(&quote.start_date, &quote.end_date)
            .map_err(|_| AppError::Internal("Stored quote interval is invalid.".to_string()))?;

        // (d) re-chequeo rápido de disponibilidad: otra reserva pudo
        // entrar durante el pago
        if !self
            .is_available(vehicle.id, &quote.start_date, &quote.end_date)
            .await?
        {
            return Err(AppError::Conflict(
                "Vehicle was booked by another user during payment. Refund will be processed shortly."
                    .to_string(),
            ));
        }

        // (e) recomputar el precio desde cero y comparar con el quote
        let recomputed = pricing_service::quote_breakdown(
            vehicle.base_price_per_hour(),
            &vehicle.fuel_type,
            start,
            end,
        );

        if (recomputed.total - quote.expected_total).abs() > 1 {
            return Err(reconciliation_error(
                "Price calculation mismatch after payment. Contact support.",
                Some(&payment.id),
            ));
        }

        // (f) insertar la reserva; el repositorio repite el chequeo de
        // solapamiento bajo el lock del vehículo
        let booking = self
            .bookings
            .create_confirmed(
                user_id,
                vehicle.id,
                start,
                end,
                recomputed.total,
                recomputed.deposit,
                &payment.id,
            )
            .await?;

        log::info!(
            "✅ Reserva {} confirmada para usuario {} (pago {})",
            booking.id,
            user_id,
            payment.id
        );

        Ok(BookingConfirmedResponse {
            booking_id: booking.id,
            total: booking.total_price,
        })
    }

    /// Cancelación del cliente con fee según antigüedad de la reserva
    pub async fn cancel_booking(
        &self,
        user_id: Uuid,
        booking_id: Uuid,
    ) -> Result<(Booking, CancellationResponse), AppError> {
        let booking = self
            .bookings
            .find_by_id_for_user(booking_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Booking not found or unauthorized.".to_string())
            })?;

        if !booking.can_cancel() {
            return Err(AppError::InvalidState(format!(
                "Booking status '{:?}' cannot be cancelled.",
                booking.status
            )));
        }

        let breakdown = booking.cancellation_breakdown(Utc::now());

        self.bookings.mark_cancelled(booking.id).await?;

        log::info!(
            "🚫 Reserva {} cancelada (fee {}, reembolso {})",
            booking.id,
            breakdown.fee,
            breakdown.refund_amount
        );

        Ok((
            booking,
            CancellationResponse {
                refund_amount: breakdown.refund_amount,
                fee: breakdown.fee,
            },
        ))
    }
}

/// Gates de reconciliación del pago contra el quote almacenado.
///
/// Cualquier mismatch es fatal para el intento: el pago pudo haberse
/// capturado sin que exista reserva, así que el error conserva el
/// payment id para el escalado a soporte.
pub fn verify_payment_against_quote(
    payment: &RazorpayPayment,
    quote: &PendingQuote,
    claimed_order_id: &str,
) -> Result<(), AppError> {
    if payment.order_id != claimed_order_id || payment.order_id != quote.razorpay_order_id {
        return Err(reconciliation_error(
            "Payment verification failed: order mismatch. Please contact support.",
            Some(&payment.id),
        ));
    }

    let expected_amount_paise = quote.expected_total * 100;
    if payment.amount != expected_amount_paise {
        return Err(reconciliation_error(
            "Payment verification failed: amount mismatch. Please contact support.",
            Some(&payment.id),
        ));
    }

    if payment.status != "captured" {
        return Err(reconciliation_error(
            "Payment verification failed: payment not captured. Please contact support.",
            Some(&payment.id),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote() -> PendingQuote {
        PendingQuote {
            vehicle_id: Uuid::new_v4(),
            vehicle_code: "swift-pune-1".to_string(),
            razorpay_order_id: "order_abc".to_string(),
            start_date: "2026-03-01 10:00:00".to_string(),
            end_date: "2026-03-01 13:00:00".to_string(),
            expected_total: 854,
            expected_deposit: 500,
        }
    }

    fn captured_payment() -> RazorpayPayment {
        RazorpayPayment {
            id: "pay_xyz".to_string(),
            order_id: "order_abc".to_string(),
            amount: 85400,
            status: "captured".to_string(),
        }
    }

    #[test]
    fn test_verification_accepts_matching_payment() {
        assert!(verify_payment_against_quote(&captured_payment(), &quote(), "order_abc").is_ok());
    }

    #[test]
    fn test_verification_rejects_order_mismatch() {
        let payment = captured_payment();
        let err = verify_payment_against_quote(&payment, &quote(), "order_other").unwrap_err();
        assert!(matches!(err, AppError::Reconciliation { .. }));

        let mut foreign = captured_payment();
        foreign.order_id = "order_other".to_string();
        let err = verify_payment_against_quote(&foreign, &quote(), "order_other").unwrap_err();
        assert!(matches!(err, AppError::Reconciliation { .. }));
    }

    #[test]
    fn test_verification_rejects_amount_mismatch() {
        let mut payment = captured_payment();
        payment.amount = 85300;
        let err = verify_payment_against_quote(&payment, &quote(), "order_abc").unwrap_err();
        match err {
            AppError::Reconciliation { payment_id, .. } => {
                assert_eq!(payment_id.as_deref(), Some("pay_xyz"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_verification_rejects_uncaptured_payment() {
        let mut payment = captured_payment();
        payment.status = "authorized".to_string();
        let err = verify_payment_against_quote(&payment, &quote(), "order_abc").unwrap_err();
        assert!(matches!(err, AppError::Reconciliation { .. }));
    }
}
