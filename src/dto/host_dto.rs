//! DTOs del panel de host

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request para cambiar el tier de comisión
#[derive(Debug, Deserialize)]
pub struct SetTierRequest {
    pub commission_tier: i32,
}

/// Response tras actualizar el tier
#[derive(Debug, Serialize)]
pub struct TierResponse {
    pub current_tier: i32,
    pub can_access_80_tier: bool,
}

/// Ganancias de una reserva confirmada
#[derive(Debug, Serialize)]
pub struct EarningsEntry {
    pub booking_id: Uuid,
    pub vehicle_name: String,
    pub total_booked_price: i64,
    pub deposit_amount: i64,
    pub host_earning: i64,
    pub platform_commission: i64,
    pub start_date: String,
}

/// Resumen de ganancias del host
#[derive(Debug, Serialize)]
pub struct EarningsResponse {
    pub payout_rate: i32,
    pub total_lifetime_earnings: i64,
    pub earnings: Vec<EarningsEntry>,
}
