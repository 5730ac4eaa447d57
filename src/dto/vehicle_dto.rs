//! DTOs de vehículos

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::Vehicle;

/// Request para listar un vehículo nuevo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 2, max = 50))]
    pub brand: String,

    #[validate(length(min = 2, max = 20))]
    pub vehicle_type: String,

    #[validate(length(min = 2, max = 20))]
    pub fuel_type: String,

    #[validate(length(min = 2, max = 20))]
    pub gear_type: String,

    #[validate(length(min = 2, max = 50))]
    pub city: String,

    pub sub_city: Option<String>,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    pub base_price: Decimal,

    #[validate(range(min = 1, max = 1000))]
    pub kms_per_unit: Option<i32>,

    pub features: Option<Vec<String>>,
    pub specification: Option<String>,
}

/// Request para editar un vehículo listado
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 50))]
    pub brand: Option<String>,

    #[validate(length(min = 2, max = 20))]
    pub vehicle_type: Option<String>,

    #[validate(length(min = 2, max = 20))]
    pub fuel_type: Option<String>,

    #[validate(length(min = 2, max = 20))]
    pub gear_type: Option<String>,

    pub base_price: Option<Decimal>,

    #[validate(range(min = 1, max = 1000))]
    pub kms_per_unit: Option<i32>,

    pub features: Option<Vec<String>>,
    pub specification: Option<String>,
}

/// Response de vehículo para el host
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub vehicle_code: String,
    pub name: String,
    pub brand: String,
    pub vehicle_type: String,
    pub fuel_type: String,
    pub gear_type: String,
    pub city: String,
    pub sub_city: Option<String>,
    pub base_price: Decimal,
    pub rating: f64,
    pub kms_per_unit: i32,
    pub features: Vec<String>,
    pub specification: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        let features = vehicle.feature_list();
        Self {
            id: vehicle.id,
            vehicle_code: vehicle.vehicle_code,
            name: vehicle.name,
            brand: vehicle.brand,
            vehicle_type: vehicle.vehicle_type,
            fuel_type: vehicle.fuel_type,
            gear_type: vehicle.gear_type,
            city: vehicle.city,
            sub_city: vehicle.sub_city,
            base_price: vehicle.base_price,
            rating: vehicle.rating,
            kms_per_unit: vehicle.kms_per_unit,
            features,
            specification: vehicle.specification,
            is_available: vehicle.is_available,
            created_at: vehicle.created_at,
        }
    }
}

/// Reserva confirmada visible en el dashboard del host
#[derive(Debug, Serialize)]
pub struct HostBookingView {
    pub booking_id: Uuid,
    pub customer_name: String,
    pub start_date: String,
    pub end_date: String,
}

/// Vehículo del host con sus reservas confirmadas
#[derive(Debug, Serialize)]
pub struct HostVehicleResponse {
    #[serde(flatten)]
    pub vehicle: VehicleResponse,
    pub has_future_booking: bool,
    pub bookings: Vec<HostBookingView>,
}

/// Vehículo del inventario público con su calendario de ocupación
#[derive(Debug, Serialize)]
pub struct InventoryVehicleResponse {
    pub id: String,
    pub db_id: Uuid,
    pub name: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub fuel: String,
    pub gear: String,
    pub city: String,
    pub sub_city: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub base: Decimal,
    pub rating: f64,
    pub features: Vec<String>,
    pub kms: i32,
    pub specification: Option<String>,
    /// Pares [inicio, fin] de reservas confirmadas
    pub booked: Vec<[String; 2]>,
}
