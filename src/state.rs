//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;

use crate::cache::{QuoteCache, RedisClient};
use crate::config::environment::EnvironmentConfig;
use crate::services::razorpay_service::RazorpayClient;
use crate::services::twilio_service::TwilioClient;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub redis: RedisClient,
    pub razorpay: RazorpayClient,
    pub twilio: TwilioClient,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, redis: RedisClient) -> Self {
        let razorpay = RazorpayClient::new(
            config.razorpay_key_id.clone(),
            config.razorpay_key_secret.clone(),
        );

        let twilio = TwilioClient::new(
            config.twilio_account_sid.clone(),
            config.twilio_auth_token.clone(),
            config.twilio_phone_number.clone(),
        );

        Self {
            pool,
            config,
            redis,
            razorpay,
            twilio,
        }
    }

    /// Store de quotes pendientes sobre Redis con el TTL configurado
    pub fn quote_cache(&self) -> QuoteCache {
        QuoteCache::new(self.redis.clone(), self.redis.default_ttl())
    }
}
