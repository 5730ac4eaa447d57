//! Cache
//!
//! Este módulo contiene el cliente Redis y el store de quotes
//! de reserva pendientes.

pub mod quote_cache;
pub mod redis_client;

pub use quote_cache::{PendingQuote, QuoteCache};
pub use redis_client::RedisClient;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};

/// Configuración del cache
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub redis_url: String,
    pub default_ttl: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            default_ttl: 900, // 15 minutos
        }
    }
}

/// Operaciones de cache
#[async_trait::async_trait]
pub trait CacheOperations {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
    /// Obtener y eliminar atómicamente (consumo de un solo uso)
    async fn take<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;
}
