//! Quote de reserva pendiente
//!
//! Entre la creación de la orden de pago y la confirmación, el servidor
//! guarda aquí el total esperado de la reserva. El quote pertenece al
//! usuario que lo creó, un quote nuevo supersede al anterior y la
//! confirmación lo consume exactamente una vez (GETDEL).

use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CacheOperations, RedisClient};

/// Datos del quote guardados entre orden y confirmación
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingQuote {
    pub vehicle_id: Uuid,
    pub vehicle_code: String,
    pub razorpay_order_id: String,
    pub start_date: String,
    pub end_date: String,
    pub expected_total: i64,
    pub expected_deposit: i64,
}

/// Store de quotes pendientes, uno por usuario
#[derive(Clone)]
pub struct QuoteCache {
    redis: RedisClient,
    ttl: u64,
}

impl QuoteCache {
    pub fn new(redis: RedisClient, ttl: u64) -> Self {
        Self { redis, ttl }
    }

    /// Guardar el quote del usuario, reemplazando cualquier quote anterior
    pub async fn put(&self, user_id: Uuid, quote: &PendingQuote) -> Result<()> {
        let key = self.redis.quote_key(&user_id.to_string());
        self.redis.set(&key, quote, self.ttl).await
    }

    /// Consumir el quote del usuario. Tras un take exitoso el quote
    /// deja de existir: un segundo intento de confirmación no lo verá.
    pub async fn take(&self, user_id: Uuid) -> Result<Option<PendingQuote>> {
        let key = self.redis.quote_key(&user_id.to_string());
        self.redis.take(&key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_quote_roundtrip_json() {
        let quote = PendingQuote {
            vehicle_id: Uuid::new_v4(),
            vehicle_code: "honda-city-pune-7-1".to_string(),
            razorpay_order_id: "order_Mabc123".to_string(),
            start_date: "2026-03-01 10:00:00".to_string(),
            end_date: "2026-03-01 13:00:00".to_string(),
            expected_total: 854,
            expected_deposit: 500,
        };

        let json = serde_json::to_string(&quote).unwrap();
        let back: PendingQuote = serde_json::from_str(&json).unwrap();
        assert_eq!(back, quote);
    }
}
