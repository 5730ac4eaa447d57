//! DTOs del flujo de reservas

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::booking::{BookingStatus, DepositRefundStatus, RefundStatus};

/// Request de creación de orden de pago (fase de quote)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1))]
    pub vehicle_id: String,

    #[validate(length(min = 1))]
    pub start_date: String,

    #[validate(length(min = 1))]
    pub end_date: String,
}

/// Response con la orden de la pasarela lista para el checkout
#[derive(Debug, Serialize)]
pub struct OrderCreatedResponse {
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// Request de confirmación tras el pago externo
#[derive(Debug, Deserialize, Validate)]
pub struct ConfirmBookingRequest {
    #[validate(length(min = 1))]
    pub payment_id: String,

    #[validate(length(min = 1))]
    pub razorpay_order_id: String,
}

/// Response de reserva confirmada
#[derive(Debug, Serialize)]
pub struct BookingConfirmedResponse {
    pub booking_id: Uuid,
    pub total: i64,
}

/// Response de cancelación con el desglose del reembolso
#[derive(Debug, Serialize)]
pub struct CancellationResponse {
    pub refund_amount: i64,
    pub fee: i64,
}

/// Una reserva en el historial del cliente
#[derive(Debug, Serialize)]
pub struct BookingSummaryResponse {
    pub booking_id: Uuid,
    pub vehicle_name: String,
    pub vehicle_code: String,
    pub host_name: String,
    pub start_date: String,
    pub end_date: String,
    pub total_price: i64,
    pub deposit_amount: i64,
    pub status: BookingStatus,
    pub refund_status: RefundStatus,
    pub deposit_refund_status: DepositRefundStatus,
    pub booked_at: String,
    pub reviewable: bool,
}

/// Recibo detallado de una reserva
#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    pub booking_id: Uuid,
    pub vehicle_name: String,
    pub host_name: String,
    pub start_date: String,
    pub end_date: String,
    pub billed_hours: f64,
    pub subtotal_base: i64,
    pub gst: i64,
    pub deposit: i64,
    pub final_price: i64,
    pub is_cancellation_refund: bool,
}
