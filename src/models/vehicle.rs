//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle del marketplace.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub host_id: Uuid,
    pub vehicle_code: String,
    pub name: String,
    pub brand: String,
    pub vehicle_type: String,
    pub fuel_type: String,
    pub gear_type: String,
    pub city: String,
    pub sub_city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub base_price: Decimal,
    pub rating: f64,
    pub kms_per_unit: i32,
    pub features: String,
    pub specification: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Precio base por hora como f64 para el motor de precios
    pub fn base_price_per_hour(&self) -> f64 {
        self.base_price.to_f64().unwrap_or(0.0)
    }

    /// Features como lista (se almacenan separadas por coma)
    pub fn feature_list(&self) -> Vec<String> {
        if self.features.is_empty() {
            Vec::new()
        } else {
            self.features.split(',').map(|s| s.to_string()).collect()
        }
    }
}
