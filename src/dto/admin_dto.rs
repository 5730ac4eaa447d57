//! DTOs del panel de administración

use serde::Serialize;
use uuid::Uuid;

/// Cancelación con reembolso pendiente y su desglose calculado
#[derive(Debug, Serialize)]
pub struct RefundCaseResponse {
    pub booking_id: Uuid,
    pub customer_name: String,
    pub vehicle_name: String,
    pub vehicle_host: String,
    pub total_price: i64,
    pub refund_due: i64,
    pub cancellation_fee: i64,
    pub payment_id: Option<String>,
    pub booked_at: String,
}

/// Depósito pendiente de devolución tras una reserva terminada
#[derive(Debug, Serialize)]
pub struct DepositRefundCaseResponse {
    pub booking_id: Uuid,
    pub customer_name: String,
    pub vehicle_name: String,
    pub host_name: String,
    pub deposit_amount: i64,
}

/// Resumen financiero por host
#[derive(Debug, Serialize)]
pub struct HostPayoutSummary {
    pub host_id: Uuid,
    pub name: String,
    pub tier: i32,
    pub total_earnings: i64,
    pub total_bookings: i64,
}

/// Dashboard financiero y de moderación del administrador
#[derive(Debug, Serialize)]
pub struct AdminDashboardResponse {
    pub total_bookings: i64,
    pub confirmed_bookings_count: i64,
    pub cancelled_refund_count: i64,
    pub deposit_refund_count: i64,
    pub total_revenue: i64,
    pub total_hosts: i64,
    pub total_vehicles: i64,
    pub cancelled_details: Vec<RefundCaseResponse>,
    pub pending_deposit_refunds: Vec<DepositRefundCaseResponse>,
    pub pending_hosts: Vec<PendingHostResponse>,
    pub total_platform_commission: i64,
    pub total_payout_due: i64,
    pub host_payouts: Vec<HostPayoutSummary>,
}

/// Host a la espera de aprobación
#[derive(Debug, Serialize)]
pub struct PendingHostResponse {
    pub host_id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub city: String,
}

/// Resultado de aprobar un host (el SMS es best-effort)
#[derive(Debug, Serialize)]
pub struct ApproveHostResponse {
    pub sms_sent: bool,
    pub sms_message: String,
}

/// Resultado de bloquear/activar un host
#[derive(Debug, Serialize)]
pub struct ToggleHostStatusResponse {
    pub is_active: bool,
    pub affected_vehicles: u64,
}
